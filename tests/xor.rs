//! End-to-end: the finite-difference trainer learns XOR.

use fdnet::{cost, learn, train_loop, Dataset, Network, TrainConfig};

// Weights layer by layer, then biases, in `Network::param_ids` order.
const START: [f32; 9] = [0.2, 0.7, 0.6, 0.1, 0.5, 0.4, 0.3, 0.9, 0.8];

#[test]
fn learns_xor_in_250k_steps() {
    let ds = Dataset::xor().unwrap();
    let mut net = Network::new(&[2, 2, 1]).unwrap();
    net.set_parameters(&START).unwrap();

    for _ in 0..250_000 {
        learn(&mut net, &ds, 1e-3, 1e-2).unwrap();
    }

    let final_cost = cost(&mut net, &ds).unwrap();
    assert!(final_cost < 0.05, "cost {} did not drop below 0.05", final_cost);

    for (input, target) in ds.iter() {
        let out = net.forward(input).unwrap().data()[0];
        assert_eq!(out.round(), target[0], "input {:?} gave {}", input, out);
    }
}

#[test]
fn train_loop_reaches_same_result_as_learn_calls() {
    let ds = Dataset::xor().unwrap();
    let config = TrainConfig::new(2_000, 1e-3, 1e-2);

    let mut looped = Network::new(&[2, 2, 1]).unwrap();
    looped.set_parameters(&START).unwrap();
    let looped_cost = train_loop(&mut looped, &ds, &config).unwrap();

    let mut manual = Network::new(&[2, 2, 1]).unwrap();
    manual.set_parameters(&START).unwrap();
    for _ in 0..2_000 {
        learn(&mut manual, &ds, 1e-3, 1e-2).unwrap();
    }

    assert_eq!(looped.parameters(), manual.parameters());
    assert_eq!(looped_cost, cost(&mut manual, &ds).unwrap());
}
