use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_timing::{Builder, Histogram};

// Categories for the timed phases of a run
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    DistanceCalculation { subcategory: DistanceType },
    PosteriorUpdate,
    Sampling,
    FileIO { subcategory: FileIOType },
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum DistanceType {
    GreatCircle,
    CrossTrack,
    Segment,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum FileIOType {
    DataLoad,
    ResultsSave,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::DistanceCalculation { subcategory } => {
                format!(
                    "Distance Calculation - {}",
                    match subcategory {
                        DistanceType::GreatCircle => "Great Circle",
                        DistanceType::CrossTrack => "Cross Track",
                        DistanceType::Segment => "Segment",
                    }
                )
            }
            OperationCategory::PosteriorUpdate => "Posterior Update".to_string(),
            OperationCategory::Sampling => "Sampling".to_string(),
            OperationCategory::FileIO { subcategory } => {
                format!(
                    "File I/O - {}",
                    match subcategory {
                        FileIOType::DataLoad => "Data Load",
                        FileIOType::ResultsSave => "Results Save",
                    }
                )
            }
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize)>>> =
        Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, (Duration, usize)>>> =
        Arc::new(RwLock::new(HashMap::new()));
}

pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        record_timing_end(&self.function_name, self.start.elapsed(), &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    TimingGuard {
        function_name: function_name.to_string(),
        category,
        start: Instant::now(),
    }
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    if !is_timing_enabled() {
        return;
    }

    {
        let mut timings = FUNCTION_TIMINGS.write();
        let entry = timings
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0));
        entry.0 += duration;
        entry.1 += 1;
    }

    {
        let mut timings = CATEGORY_TIMINGS.write();
        let entry = timings
            .entry(category.clone())
            .or_insert((Duration::from_nanos(0), 0));
        entry.0 += duration;
        entry.1 += 1;
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let default_level = if debug_logging { Level::DEBUG } else { Level::INFO };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(default_level.into())
        .add_directive("whereabouts=debug".parse().unwrap());

    if enable_timing {
        let histogram = || Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3).unwrap();
        let timing_layer = Builder::default().layer(histogram);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty());

        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set up tracing subscriber");
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nDetailed Performance Report");
    println!("==========================");

    println!("\nPer-Function Timing:");
    println!("--------------------");
    let timings = FUNCTION_TIMINGS.read();
    let mut entries: Vec<_> = timings.iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));

    for (function_name, (total, count)) in entries {
        let avg = total.div_f64(*count as f64);
        println!(
            "{}: total={:.2}s, count={}, avg={:.2}ms",
            function_name,
            total.as_secs_f64(),
            count,
            avg.as_secs_f64() * 1000.0
        );
    }

    println!("\nPer-Category Timing:");
    println!("--------------------");
    let categories = CATEGORY_TIMINGS.read();
    let mut entries: Vec<_> = categories.iter().collect();
    entries.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));

    for (category, (total, count)) in entries {
        println!(
            "{}: total={:.2}s, count={}",
            category.as_str(),
            total.as_secs_f64(),
            count
        );
    }
}
