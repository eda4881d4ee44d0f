//! Classification of the first word of a source line.

use quill_ir::{QubitId, StandardGate};

/// Marker that starts a comment line.
pub const COMMENT_MARKER: &str = "//";

/// Separator between gate operands and control qubits.
pub const CONTROL_DELIMITER: &str = "|";

/// Structural keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Init,
    Def,
    Endef,
    For,
    Endfor,
}

impl Keyword {
    /// Recognize a keyword.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "init" => Some(Keyword::Init),
            "def" => Some(Keyword::Def),
            "endef" => Some(Keyword::Endef),
            "for" => Some(Keyword::For),
            "endfor" => Some(Keyword::Endfor),
            _ => None,
        }
    }
}

/// Gate kinds as spelled in source, before operands are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    I,
    H,
    X,
    Y,
    Z,
    P,
    Rx,
    Ry,
    Rz,
    Swap,
}

/// Operands a gate takes before its control list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandShape {
    /// One active qubit.
    Single,
    /// Active qubit and an angle.
    Angle,
    /// Two qubits.
    Pair,
}

impl GateKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "I" => Some(GateKind::I),
            "H" => Some(GateKind::H),
            "X" => Some(GateKind::X),
            "Y" => Some(GateKind::Y),
            "Z" => Some(GateKind::Z),
            "P" => Some(GateKind::P),
            "RX" => Some(GateKind::Rx),
            "RY" => Some(GateKind::Ry),
            "RZ" => Some(GateKind::Rz),
            "SWAP" => Some(GateKind::Swap),
            _ => None,
        }
    }

    /// Operands this gate kind takes.
    pub fn shape(self) -> OperandShape {
        match self {
            GateKind::I | GateKind::H | GateKind::X | GateKind::Y | GateKind::Z => {
                OperandShape::Single
            }
            GateKind::P | GateKind::Rx | GateKind::Ry | GateKind::Rz => OperandShape::Angle,
            GateKind::Swap => OperandShape::Pair,
        }
    }

    /// Build the catalog gate from the operand that matches the shape.
    ///
    /// Returns `None` if the operand does not fit.
    pub fn instantiate(self, angle: Option<f64>, partner: Option<QubitId>) -> Option<StandardGate> {
        let gate = match (self, angle, partner) {
            (GateKind::I, None, None) => StandardGate::I,
            (GateKind::H, None, None) => StandardGate::H,
            (GateKind::X, None, None) => StandardGate::X,
            (GateKind::Y, None, None) => StandardGate::Y,
            (GateKind::Z, None, None) => StandardGate::Z,
            (GateKind::P, Some(a), None) => StandardGate::P(a),
            (GateKind::Rx, Some(a), None) => StandardGate::Rx(a),
            (GateKind::Ry, Some(a), None) => StandardGate::Ry(a),
            (GateKind::Rz, Some(a), None) => StandardGate::Rz(a),
            (GateKind::Swap, None, Some(q)) => StandardGate::Swap(q),
            _ => return None,
        };
        Some(gate)
    }
}

/// A gate mnemonic: a kind plus whether the `C` prefix was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mnemonic {
    pub kind: GateKind,
    pub controlled: bool,
}

impl Mnemonic {
    /// Recognize `H`, `CH`, `RX`, `CRX`, `SWAP`, `CSWAP` and so on.
    pub fn parse(word: &str) -> Option<Self> {
        if let Some(kind) = GateKind::from_name(word) {
            return Some(Mnemonic {
                kind,
                controlled: false,
            });
        }
        let kind = GateKind::from_name(word.strip_prefix('C')?)?;
        Some(Mnemonic {
            kind,
            controlled: true,
        })
    }

    /// Operands before the control list.
    pub fn shape(self) -> OperandShape {
        self.kind.shape()
    }
}

/// Whether `word` is a keyword or a gate mnemonic and so cannot name a
/// definition.
pub fn is_reserved(word: &str) -> bool {
    Keyword::parse(word).is_some() || Mnemonic::parse(word).is_some()
}

/// Whether a (trimmed) line is blank or a comment.
pub fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(Keyword::parse("init"), Some(Keyword::Init));
        assert_eq!(Keyword::parse("endfor"), Some(Keyword::Endfor));
        assert_eq!(Keyword::parse("Init"), None);
    }

    #[test]
    fn test_mnemonics() {
        let cx = Mnemonic::parse("CX").unwrap();
        assert_eq!(cx.kind, GateKind::X);
        assert!(cx.controlled);

        let rz = Mnemonic::parse("RZ").unwrap();
        assert_eq!(rz.shape(), OperandShape::Angle);
        assert!(!rz.controlled);

        assert_eq!(Mnemonic::parse("CSWAP").unwrap().shape(), OperandShape::Pair);
        assert!(Mnemonic::parse("CI").unwrap().controlled);
        assert!(Mnemonic::parse("C").is_none());
        assert!(Mnemonic::parse("CCX").is_none());
        assert!(Mnemonic::parse("h").is_none());
    }

    #[test]
    fn test_instantiate_checks_operands() {
        assert_eq!(GateKind::H.instantiate(None, None), Some(StandardGate::H));
        assert_eq!(
            GateKind::P.instantiate(Some(0.5), None),
            Some(StandardGate::P(0.5))
        );
        assert_eq!(
            GateKind::Swap.instantiate(None, Some(QubitId(2))),
            Some(StandardGate::Swap(QubitId(2)))
        );
        assert_eq!(GateKind::P.instantiate(None, None), None);
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved("def"));
        assert!(is_reserved("CRY"));
        assert!(!is_reserved("bell"));
    }

    #[test]
    fn test_skippable_lines() {
        assert!(is_skippable(""));
        assert!(is_skippable("// comment"));
        assert!(!is_skippable("H 1"));
    }
}
