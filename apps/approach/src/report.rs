//! Plain-text summaries printed to stdout.

use fa_core::RunConfig;
use fa_sim::{RunResult, SweepPoint};

pub fn print_config(cfg: &RunConfig) {
    let closures: Vec<String> = cfg
        .sorted_closures()
        .iter()
        .map(|c| format!("[{}, {})", c.start_tick, c.end_tick()))
        .collect();
    println!(
        "λ = {:.3}/min ({:?})  |  horizon {} min  |  windy {} (p = {:.2})  |  seed {}",
        cfg.arrival_rate,
        cfg.arrival_process,
        cfg.horizon_ticks,
        cfg.windy,
        cfg.go_around_probability,
        cfg.seed,
    );
    println!(
        "gap {} min  |  max hold {}  |  closures {}",
        cfg.reentry.min_gap_ticks,
        cfg.reentry
            .max_hold_ticks
            .map_or_else(|| "none".to_owned(), |h| format!("{h} min")),
        if closures.is_empty() { "none".to_owned() } else { closures.join(" ") },
    );
    println!();
}

pub fn print_run(result: &RunResult) {
    let m = &result.metrics;
    println!("{:<22} {:>10}", "arrivals", m.arrivals);
    println!("{:<22} {:>10}", "landings", m.landings);
    println!("{:<22} {:>10}", "diversions", m.diversions);
    println!("{:<22} {:>10}", "  no gap", m.diversions_no_gap);
    println!("{:<22} {:>10}", "  hold limit", m.diversions_hold_limit);
    println!("{:<22} {:>10}", "  horizon", m.diversions_horizon);
    println!("{:<22} {:>10}", "go-arounds", m.go_arounds);
    println!("{:<22} {:>10}", "closure-affected", m.closure_affected);
    println!("{:<22} {:>10.2}", "mean delay (min)", m.mean_delay());
    println!("{:<22} {:>10}", "max delay (min)", m.max_delay);
    println!("{:<22} {:>9.1}%", "diversion rate", m.diversion_rate() * 100.0);
    println!("{:<22} {:>9.1}%", "congested", m.congestion_rate() * 100.0);
    println!("{:<22} {:>10.2}", "throughput (/h)", m.throughput_per_hour());
    println!("{:<22} {:>10.2}", "mean queue", m.mean_queue());
    println!("{:<22} {:>10}", "peak queue", m.peak_queue);
}

pub fn print_sweep(points: &[SweepPoint]) {
    println!(
        "{:>7} {:>5} {:>16} {:>16} {:>18} {:>16}",
        "λ", "runs", "mean delay", "diversion %", "go-arounds", "congested %"
    );
    println!("{}", "-".repeat(83));
    for p in points {
        println!(
            "{:>7.3} {:>5} {:>8.2} ± {:<5.2} {:>8.2} ± {:<5.2} {:>10.2} ± {:<5.2} {:>8.2} ± {:<5.2}",
            p.arrival_rate,
            p.replications,
            p.mean_delay.mean,
            p.mean_delay.half_width,
            p.diversion_rate.mean * 100.0,
            p.diversion_rate.half_width * 100.0,
            p.go_arounds.mean,
            p.go_arounds.half_width,
            p.congestion_rate.mean * 100.0,
            p.congestion_rate.half_width * 100.0,
        );
    }
}
