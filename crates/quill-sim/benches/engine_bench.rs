//! Benchmarks for gate application on dense registers.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quill_ir::{Controls, Gate, Operation, QubitId, StandardGate};
use quill_sim::QuantumRegister;

fn hadamard_layer(num_qubits: u32) -> Vec<Gate> {
    (1..=num_qubits)
        .map(|q| Operation::uncontrolled(StandardGate::H, QubitId(q)).unwrap().into())
        .collect()
}

fn cx_chain(num_qubits: u32) -> Vec<Gate> {
    (2..=num_qubits)
        .map(|q| {
            Operation::new(
                StandardGate::X,
                QubitId(q),
                Controls::new([QubitId(q - 1)]).unwrap(),
            )
            .unwrap()
            .into()
        })
        .collect()
}

fn bench_hadamard_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("hadamard_layer");

    for num_qubits in [8, 12, 16] {
        let gates = hadamard_layer(num_qubits);
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &gates,
            |b, gates| {
                b.iter(|| {
                    let mut reg = QuantumRegister::new(num_qubits).unwrap();
                    reg.run(black_box(gates)).unwrap();
                    reg
                });
            },
        );
    }

    group.finish();
}

fn bench_ghz(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz");

    for num_qubits in [8, 12, 16] {
        let mut gates = vec![Operation::uncontrolled(StandardGate::H, QubitId(1)).unwrap().into()];
        gates.extend(cx_chain(num_qubits));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_qubits),
            &gates,
            |b, gates| {
                b.iter(|| {
                    let mut reg = QuantumRegister::new(num_qubits).unwrap();
                    reg.run(black_box(gates)).unwrap();
                    reg
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_hadamard_layer, bench_ghz);
criterion_main!(benches);
