//! Print the frequency response and noise spectrum of a microphone.
//!
//! Each command-line argument is one comma-separated parameter row (see
//! `MicParams`); with none, the default microphone is simulated.
//!
//! Run with:
//!   RUST_LOG=debug cargo run -p mic-core --example sweep -- "0.3,0.2,0.15,1.3,1.85,180,280,6.0"

use mic_core::constants::AirState;
use mic_core::frequency_response::log_spaced;
use mic_core::weighting::a_weight;
use mic_core::{MicParams, SimResult};

fn main() -> SimResult<()> {
    env_logger::init();

    println!("{}", AirState::default());

    let rows: Vec<String> = std::env::args().skip(1).collect();
    let params = if rows.is_empty() {
        vec![MicParams::default()]
    } else {
        rows.iter()
            .map(|row| row.parse())
            .collect::<SimResult<Vec<MicParams>>>()?
    };

    let freqs = log_spaced(1.0, 5.0, 41);
    for (i, p) in params.iter().enumerate() {
        let result = mic_core::compute(p, &freqs)?;
        println!();
        println!("microphone #{}: {:?}", i + 1, p);
        println!(
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "freq (Hz)", "sens (dB)", "phase", "noise (dB)", "A-wt (dB)"
        );
        for (j, f) in result.frequencies.iter().enumerate() {
            println!(
                "{:>10.1} {:>10.2} {:>10.3} {:>10.1} {:>10.2}",
                f,
                result.sensitivity_db[j],
                result.phase[j],
                result.noise_total_db[j],
                a_weight(*f)?
            );
        }
        if let Some(peak) = result.peak_index() {
            println!(
                "peak: {:.2} dB at {:.0} Hz",
                result.sensitivity_db[peak], result.frequencies[peak]
            );
        }
    }

    Ok(())
}
