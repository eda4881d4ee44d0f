//! Property-based tests for the execution engine.
//!
//! Registers are random normalized statevectors of 1-4 qubits.

use num_complex::Complex64;
use proptest::prelude::*;
use quill_ir::{Controls, Gate, Operation, QubitId, StandardGate};
use quill_sim::QuantumRegister;

const TOLERANCE: f64 = 1e-9;

/// Random normalized register with exactly `n` qubits.
fn arb_register_of(n: u32) -> impl Strategy<Value = QuantumRegister> {
    prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1usize << n).prop_filter_map(
        "zero vector cannot be normalized",
        |pairs| {
            let amps: Vec<Complex64> = pairs
                .into_iter()
                .map(|(re, im)| Complex64::new(re, im))
                .collect();
            let norm = amps.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
            if norm < 1e-6 {
                return None;
            }
            QuantumRegister::from_amplitudes(amps.into_iter().map(|a| a / norm).collect()).ok()
        },
    )
}

fn arb_register(max_qubits: u32) -> impl Strategy<Value = QuantumRegister> {
    (1..=max_qubits).prop_flat_map(arb_register_of)
}

/// Any gate of the catalog that has a matrix.
fn arb_matrix_gate() -> impl Strategy<Value = StandardGate> {
    let angle = -10.0f64..10.0;
    prop_oneof![
        Just(StandardGate::I),
        Just(StandardGate::H),
        Just(StandardGate::X),
        Just(StandardGate::Y),
        Just(StandardGate::Z),
        angle.clone().prop_map(StandardGate::P),
        angle.clone().prop_map(StandardGate::Rx),
        angle.clone().prop_map(StandardGate::Ry),
        angle.prop_map(StandardGate::Rz),
    ]
}

/// Register plus a shuffled list of its qubit numbers.
fn arb_register_with_qubits(
    min_qubits: u32,
) -> impl Strategy<Value = (QuantumRegister, Vec<u32>)> {
    (min_qubits..=4).prop_flat_map(|n| {
        (
            arb_register_of(n),
            Just((1..=n).collect::<Vec<u32>>()).prop_shuffle(),
        )
    })
}

fn assert_close(a: &[Complex64], b: &[Complex64]) {
    assert_eq!(a.len(), b.len());
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert!((x - y).norm() < TOLERANCE, "amplitude {i} differs: {x} vs {y}");
    }
}

proptest! {
    #[test]
    fn identity_leaves_register_unchanged(reg in arb_register(4), target in 1u32..=4) {
        prop_assume!(target <= reg.num_qubits());
        let before = reg.amplitudes().to_vec();
        let mut reg = reg;
        let id: Gate = Operation::uncontrolled(StandardGate::I, QubitId(target)).unwrap().into();
        reg.apply(&id).unwrap();
        assert_close(reg.amplitudes(), &before);
    }

    #[test]
    fn matrix_gates_preserve_norm(
        (reg, qubits) in arb_register_with_qubits(1),
        gate in arb_matrix_gate(),
    ) {
        let mut reg = reg;
        let before = reg.norm_sqr();
        let op: Gate = Operation::uncontrolled(gate, QubitId(qubits[0])).unwrap().into();
        reg.apply(&op).unwrap();
        prop_assert!((reg.norm_sqr() - before).abs() < TOLERANCE);
    }

    #[test]
    fn controls_gate_exactly_the_satisfied_subspace(
        (reg, qubits) in arb_register_with_qubits(2),
        gate in arb_matrix_gate(),
        num_controls in 1usize..4,
    ) {
        let num_controls = num_controls.min(qubits.len() - 1);
        let target = QubitId(qubits[0]);
        let controls = Controls::new(qubits[1..=num_controls].iter().map(|&q| QubitId(q))).unwrap();

        let original = reg.amplitudes().to_vec();
        let mut with_controls = reg.clone();
        let mut without_controls = reg;

        with_controls
            .apply(&Operation::new(gate, target, controls.clone()).unwrap().into())
            .unwrap();
        without_controls
            .apply(&Operation::uncontrolled(gate, target).unwrap().into())
            .unwrap();

        for n in 0..original.len() {
            let expected = if controls.is_satisfied(n) {
                without_controls.amplitudes()[n]
            } else {
                original[n]
            };
            prop_assert!((with_controls.amplitudes()[n] - expected).norm() < TOLERANCE);
        }
    }

    #[test]
    fn swap_is_an_involution(
        (reg, qubits) in arb_register_with_qubits(2),
        num_controls in 0usize..3,
    ) {
        let num_controls = num_controls.min(qubits.len() - 2);
        let controls = Controls::new(qubits[2..2 + num_controls].iter().map(|&q| QubitId(q))).unwrap();
        let swap: Gate = Operation::new(
            StandardGate::Swap(QubitId(qubits[1])),
            QubitId(qubits[0]),
            controls,
        )
        .unwrap()
        .into();

        let before = reg.amplitudes().to_vec();
        let mut reg = reg;
        reg.apply(&swap).unwrap();
        reg.apply(&swap).unwrap();
        assert_close(reg.amplitudes(), &before);
    }
}
