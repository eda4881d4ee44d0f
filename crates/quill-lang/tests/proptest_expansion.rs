//! Property-based tests for macro and loop expansion.
//!
//! Each test builds two programs that must be equivalent: one using a
//! `def` or `for` construct, one with the construct written out by hand
//! with the variables replaced by their values.

use proptest::prelude::*;
use quill_lang::parse;

const TOLERANCE: f64 = 1e-9;

/// One line of a body template over the variables `$a` and `$b`.
#[derive(Debug, Clone)]
enum Template {
    H(&'static str),
    Rx(&'static str, f64),
    Rz(&'static str, f64),
    Cx { target: &'static str, control: &'static str },
    Swap,
}

impl Template {
    fn render(&self) -> String {
        match self {
            Template::H(q) => format!("H {q}"),
            Template::Rx(q, angle) => format!("RX {q} {angle}"),
            Template::Rz(q, angle) => format!("RZ {q} {angle}*pi"),
            Template::Cx { target, control } => format!("CX {target} | {control}"),
            Template::Swap => "SWAP $a $b".to_string(),
        }
    }
}

fn arb_variable() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("$a"), Just("$b")]
}

fn arb_template() -> impl Strategy<Value = Template> {
    let angle = -3.0f64..3.0;
    prop_oneof![
        arb_variable().prop_map(Template::H),
        (arb_variable(), angle.clone()).prop_map(|(q, a)| Template::Rx(q, a)),
        (arb_variable(), angle).prop_map(|(q, a)| Template::Rz(q, a)),
        Just(Template::Cx {
            target: "$b",
            control: "$a"
        }),
        Just(Template::Cx {
            target: "$a",
            control: "$b"
        }),
        Just(Template::Swap),
    ]
}

/// Register width plus two distinct qubits in it.
fn arb_qubit_pair() -> impl Strategy<Value = (u32, u32, u32)> {
    (2u32..=4).prop_flat_map(|n| {
        (Just(n), 1..=n, 1..=n).prop_filter("distinct qubits", |(_, a, b)| a != b)
    })
}

/// A layer that spreads the all-zero state so the tests compare something
/// non-trivial.
fn preparation(n: u32) -> String {
    (1..=n)
        .map(|q| format!("RY {q} {}\n", 0.3 * f64::from(q)))
        .collect()
}

fn final_amplitudes(source: &str) -> Vec<num_complex::Complex64> {
    parse(source)
        .unwrap()
        .execute()
        .unwrap()
        .amplitudes()
        .to_vec()
}

fn assert_same_state(left: &str, right: &str) -> Result<(), TestCaseError> {
    let a = final_amplitudes(left);
    let b = final_amplitudes(right);
    prop_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        prop_assert!((x - y).norm() < TOLERANCE, "{} vs {}", x, y);
    }
    Ok(())
}

proptest! {
    #[test]
    fn macro_matches_inlined_body(
        (n, a, b) in arb_qubit_pair(),
        body in prop::collection::vec(arb_template(), 1..=6),
    ) {
        let lines: Vec<String> = body.iter().map(Template::render).collect();

        let mut with_macro = format!("init {n}\n{}def m $a $b\n", preparation(n));
        for line in &lines {
            with_macro.push_str(line);
            with_macro.push('\n');
        }
        with_macro.push_str(&format!("endef\nm {a} {b}\n"));

        let mut inlined = format!("init {n}\n{}", preparation(n));
        for line in &lines {
            inlined.push_str(&line.replace("$a", &a.to_string()).replace("$b", &b.to_string()));
            inlined.push('\n');
        }

        assert_same_state(&with_macro, &inlined)?;
    }

    #[test]
    fn loop_matches_unrolled_body(
        n in 2u32..=4,
        start in 1i64..=3,
        end in 1i64..=3,
        angle in -3.0f64..3.0,
    ) {
        let last = i64::from(n) - 1;
        let (start, end) = (start.min(last), end.min(last));
        let body = [
            format!("RY $i {angle}"),
            "CX $i+1 | $i".to_string(),
            format!("RZ $i+1 {angle}/2"),
        ];

        let mut looped = format!("init {n}\n{}for $i {start}:{end}\n", preparation(n));
        for line in &body {
            looped.push_str(line);
            looped.push('\n');
        }
        looped.push_str("endfor\n");

        let mut unrolled = format!("init {n}\n{}", preparation(n));
        for value in start..=end {
            for line in &body {
                unrolled.push_str(&line.replace("$i", &value.to_string()));
                unrolled.push('\n');
            }
        }

        assert_same_state(&looped, &unrolled)?;
    }
}
