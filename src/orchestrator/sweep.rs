//! SNR sweep across every timing error detector
//!
//! SNR points are handed to a pool of workers over a crossbeam channel.
//! A worker builds the noisy, upsampled waveform for its point once, then
//! runs all three detectors on scoped threads that share it read-only.
//!
//! Noise for point `i` is seeded from `(seed, i)`, so the results are the
//! same whatever the worker count or scheduling. A run that fails becomes a
//! `Failed` entry and the sweep carries on.

use std::thread;

use crossbeam_channel::unbounded;

use crate::domain::{SimulationConfig, TedMethod, TedResult};
use crate::dsp::interpolator::Upsampled;
use crate::modem::bit_error_rate;
use crate::modem::transmitter::noise_seed;

use super::results::{RunOutcome, SweepResults};
use super::single::{summarize, Link};

/// Default worker count: one per available core
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Run every method at every SNR point of `config.sweep`
pub fn run_sweep(config: &SimulationConfig, workers: usize) -> TedResult<SweepResults> {
    let link = Link::new(config)?;
    let snr_points = config.sweep.points();
    let workers = workers.clamp(1, snr_points.len().max(1));

    log::info!(
        "Sweep: {} methods x {} SNR points ({} to {} dB), {} symbols each, {} workers",
        TedMethod::ALL.len(),
        snr_points.len(),
        config.sweep.min_snr,
        config.sweep.max_snr,
        config.num_symbols,
        workers
    );

    let (job_tx, job_rx) = unbounded::<(usize, f64)>();
    let (result_tx, result_rx) = unbounded::<(usize, f64, Vec<(TedMethod, RunOutcome)>)>();

    for job in snr_points.iter().copied().enumerate() {
        if job_tx.send(job).is_err() {
            break;
        }
    }
    drop(job_tx);

    thread::scope(|scope| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let link = &link;

            scope.spawn(move || {
                for (index, snr_db) in job_rx.iter() {
                    log::debug!("worker {worker}: SNR point {index} ({snr_db} dB)");
                    let outcomes = sweep_point(link, config, index, snr_db);
                    if result_tx.send((index, snr_db, outcomes)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut results = SweepResults::new(config.clone(), snr_points);
    for (_, snr_db, outcomes) in result_rx.iter() {
        for (method, outcome) in outcomes {
            results.push(method, snr_db, outcome);
        }
    }
    results.sort();

    let failed = results.failures().count();
    if failed > 0 {
        log::warn!("Sweep finished with {failed} failed runs");
    } else {
        log::info!("Sweep finished: {} runs", results.entries.len());
    }

    Ok(results)
}

/// All methods at one SNR point, sharing one upsampled waveform
fn sweep_point(
    link: &Link,
    config: &SimulationConfig,
    index: usize,
    snr_db: f64,
) -> Vec<(TedMethod, RunOutcome)> {
    let received = link.received(Some(snr_db), noise_seed(config.seed, index));
    let waveform = link.receiver().upsample(&received);
    let waveform = &waveform;

    thread::scope(|scope| {
        let handles: Vec<_> = TedMethod::ALL
            .into_iter()
            .map(|method| {
                (
                    method,
                    scope.spawn(move || evaluate(link, config, waveform, method)),
                )
            })
            .collect();

        handles
            .into_iter()
            .map(|(method, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| RunOutcome::Failed {
                    reason: "timing loop thread panicked".into(),
                });
                if let RunOutcome::Failed { reason } = &outcome {
                    log::error!("{} at {snr_db} dB failed: {reason}", method.title());
                }
                (method, outcome)
            })
            .collect()
    })
}

fn evaluate(link: &Link, config: &SimulationConfig, waveform: &Upsampled, method: TedMethod) -> RunOutcome {
    let run = || -> TedResult<RunOutcome> {
        let recovery = link.receiver().recover(waveform, method)?;
        let ber = bit_error_rate(
            recovery.decisions(),
            link.transmission().symbols(),
            config.discard(),
        )?;
        Ok(RunOutcome::Completed(summarize(&ber, &recovery)))
    };

    run().unwrap_or_else(|e| RunOutcome::Failed {
        reason: e.to_string(),
    })
}
