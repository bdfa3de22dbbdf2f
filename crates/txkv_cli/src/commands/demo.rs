//! Demo command implementation.

use serde::Serialize;
use tracing::info;
use txkv_core::{KeyValueStore, StatsSnapshot, StoreConfig, StoreResult, TransactionalStore, Value};

/// One read performed by the walkthrough.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DemoStep {
    /// Step number, starting at 1.
    pub step: usize,
    /// Calls made during this step, ending with the read.
    pub calls: Vec<String>,
    /// Value returned by the read; `null` when absent.
    pub result: Option<Value>,
}

/// Full demo report.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    /// Steps in execution order.
    pub steps: Vec<DemoStep>,
    /// Store statistics after the walkthrough.
    pub stats: StatsSnapshot,
}

/// Runs the walkthrough against `store`.
///
/// 1. read A
/// 2. begin, put A=5, read A
/// 3. put A=6, commit, read A
/// 4. read B
/// 5. begin, put B=10, rollback, read B
pub fn walkthrough<S: KeyValueStore>(store: &mut S) -> StoreResult<Vec<DemoStep>> {
    let mut steps = Vec::with_capacity(5);
    let mut record = |calls: &[&str], result: Option<Value>| {
        steps.push(DemoStep {
            step: steps.len() + 1,
            calls: calls.iter().map(|c| (*c).to_string()).collect(),
            result,
        });
    };

    record(&["get A"], store.get("A"));

    store.begin_transaction()?;
    store.put("A", 5)?;
    record(&["begin", "put A 5", "get A"], store.get("A"));

    store.put("A", 6)?;
    store.commit()?;
    record(&["put A 6", "commit", "get A"], store.get("A"));

    record(&["get B"], store.get("B"));

    store.begin_transaction()?;
    store.put("B", 10)?;
    store.rollback()?;
    record(&["begin", "put B 10", "rollback", "get B"], store.get("B"));

    Ok(steps)
}

/// Runs the walkthrough on a fresh store and collects the report.
pub fn report() -> StoreResult<DemoReport> {
    let mut store = TransactionalStore::with_config(StoreConfig::new().label("demo"));
    let steps = walkthrough(&mut store)?;
    Ok(DemoReport {
        steps,
        stats: store.stats().snapshot(),
    })
}

/// Runs the demo command.
pub fn run(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    info!("Running walkthrough");
    let report = report()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            for step in &report.steps {
                println!("{}", render(step.result));
            }
        }
        other => return Err(format!("Unknown format: {other}").into()),
    }

    Ok(())
}

/// Renders a read result the way the walkthrough prints it.
pub fn render(value: Option<Value>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}
