//! Console prompt for the quantum numbers.

use log::warn;
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

use crate::physics::QuantumNumbers;

/// Substituted whenever the console input cannot be parsed (the 2p orbital).
pub const DEFAULT_TRIPLE: QuantumNumbers = QuantumNumbers { n: 2, l: 1, m: 0 };

pub const EXAMPLES: &[(&str, QuantumNumbers)] = &[
    ("1s", QuantumNumbers { n: 1, l: 0, m: 0 }),
    ("2s", QuantumNumbers { n: 2, l: 0, m: 0 }),
    ("2p", QuantumNumbers { n: 2, l: 1, m: 0 }),
    ("3d", QuantumNumbers { n: 3, l: 2, m: 1 }),
];

pub fn parse_triple(n: &str, l: &str, m: &str) -> Result<QuantumNumbers, ParseIntError> {
    Ok(QuantumNumbers::unchecked(
        n.trim().parse()?,
        l.trim().parse()?,
        m.trim().parse()?,
    ))
}

/// Parses the answers, substituting `DEFAULT_TRIPLE` on any parse failure.
pub fn triple_or_default(n: &str, l: &str, m: &str) -> QuantumNumbers {
    match parse_triple(n, l, m) {
        Ok(qn) => qn,
        Err(e) => {
            warn!("invalid input ({e}); using default ({DEFAULT_TRIPLE})");
            DEFAULT_TRIPLE
        }
    }
}

/// Asks for n, l and m in turn. End of input counts as a parse failure.
pub fn prompt_triple<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<QuantumNumbers> {
    let mut answers = Vec::with_capacity(3);
    for question in ["Enter n (1-3): ", "Enter l (0-2): ", "Enter m (-l to l): "] {
        write!(output, "{question}")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        answers.push(line);
    }

    Ok(match answers.as_slice() {
        [n, l, m] => triple_or_default(n, l, m),
        _ => {
            warn!("input ended early; using default ({DEFAULT_TRIPLE})");
            DEFAULT_TRIPLE
        }
    })
}

pub fn print_banner<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "=== Interactive Hydrogen Orbital Visualizer ===")?;
    writeln!(output, "Examples:")?;
    for (label, qn) in EXAMPLES {
        writeln!(output, "  {label} -> {qn}")?;
    }
    writeln!(output, "===============================================")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_triple() {
        let qn = parse_triple(" 3", "2\n", "-1 ").unwrap();
        assert_eq!(qn, QuantumNumbers::unchecked(3, 2, -1));
        assert!(parse_triple("x", "0", "0").is_err());
        assert!(parse_triple("-1", "0", "0").is_err());
    }

    #[test]
    fn test_bad_input_uses_default() {
        assert_eq!(triple_or_default("two", "1", "0"), DEFAULT_TRIPLE);
        assert_eq!(triple_or_default("", "", ""), DEFAULT_TRIPLE);
    }

    #[test]
    fn test_prompt_reads_three_lines() {
        let mut input = Cursor::new("3\n2\n1\n");
        let mut output = Vec::new();
        let qn = prompt_triple(&mut input, &mut output).unwrap();
        assert_eq!(qn, QuantumNumbers::unchecked(3, 2, 1));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter m"));
    }

    #[test]
    fn test_prompt_eof_uses_default() {
        let mut input = Cursor::new("1\n");
        let qn = prompt_triple(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(qn, DEFAULT_TRIPLE);
    }

    #[test]
    fn test_banner_lists_examples() {
        let mut out = Vec::new();
        print_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("3d -> n=3, l=2, m=1"));
    }
}
