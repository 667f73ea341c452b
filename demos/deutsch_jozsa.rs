//! Example: classifying oracles with the Deutsch-Jozsa algorithm.
//! One oracle query per run decides constant vs. balanced — a task that
//! classically needs up to 2^(m-1) + 1 evaluations of f.

use deutsch_jozsa::{Classification, DeutschJozsa, Oracle, Simulator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Deutsch-Jozsa: one query, constant vs. balanced (m=4) ---");

    let m = 4;
    let shots = 100_000;
    let simulator = Simulator::new();

    let oracles = [
        Oracle::ConstantZero,
        Oracle::ConstantOne,
        Oracle::Parity,
        Oracle::SubsetParity { controls: vec![0, 2] },
    ];

    for oracle in oracles {
        let algorithm = DeutschJozsa::new(m, oracle.clone())?;

        println!("\nOracle under test: {}", oracle);
        println!("{}", algorithm.circuit()?);

        let outcome = algorithm.run(&simulator, shots)?;
        println!("{}", outcome);

        // The verdict must agree with what we secretly know about f.
        let expected = if oracle.is_balanced() {
            Classification::Balanced
        } else {
            Classification::Constant
        };
        assert_eq!(outcome.classification, expected, "verdict mismatch for {}", oracle);
        println!("Verdict matches the hidden function: {}", expected);
    }

    Ok(())
}
