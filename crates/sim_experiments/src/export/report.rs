use std::io::{BufWriter, Write};

use sim_core::severity::Severity;
use sim_core::simulation::RunOutput;

use super::writer_utils::optional;

/// File name of one run's report, e.g. `run_007.csv`.
pub(crate) fn report_file_name(run_id: u64) -> String {
    format!("run_{run_id:03}.csv")
}

/// Metric/value rows of the summary block, in output order.
pub(crate) fn summary_rows(output: &RunOutput) -> Vec<(&'static str, String)> {
    let summary = &output.summary;
    let params = &output.params;
    vec![
        ("RunID", params.run_id.to_string()),
        ("NumDoctors", params.capacity.to_string()),
        ("ArrivalRate", params.arrival_rate.to_string()),
        ("ServiceRate", params.service_time.rate().to_string()),
        ("AvgWaitingTime_Low", optional(summary.avg_wait(Severity::Low))),
        ("AvgWaitingTime_Medium", optional(summary.avg_wait(Severity::Medium))),
        ("AvgWaitingTime_High", optional(summary.avg_wait(Severity::High))),
        ("AvgQueueLength", optional(summary.avg_queue_length)),
        ("AvgSystemTime", optional(summary.avg_system_time)),
        ("ResourceUtilization", optional(summary.resource_utilization)),
        ("Throughput", optional(summary.throughput)),
        ("MaxWaitingTime_Low", optional(summary.max_wait(Severity::Low))),
        ("MaxWaitingTime_Medium", optional(summary.max_wait(Severity::Medium))),
        ("MaxWaitingTime_High", optional(summary.max_wait(Severity::High))),
        ("PatientsCompleted", summary.patients_completed.to_string()),
    ]
}

/// Writes the three-block report: metadata, summary metrics, time series.
pub(crate) fn write_run_report_impl(
    output: &RunOutput,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = &output.params;
    let mut out = BufWriter::new(file);

    writeln!(out, "# --- Metadata ---")?;
    writeln!(out, "RunID,{}", params.run_id)?;
    writeln!(out, "Seed,{}", output.summary.seed)?;
    writeln!(out, "NumDoctors,{}", params.capacity)?;
    writeln!(out, "ArrivalRate,{}", params.arrival_rate)?;
    writeln!(out, "ServiceRate,{}", params.service_time.rate())?;
    writeln!(out, "ServiceDistribution,{}", params.service_time.label())?;
    writeln!(out, "SimulationDuration,{}", params.horizon)?;

    writeln!(out)?;
    writeln!(out, "# --- Summary Metrics ---")?;
    {
        let mut wtr = csv::Writer::from_writer(&mut out);
        wtr.write_record(["Metric", "Value"])?;
        for (metric, value) in summary_rows(output) {
            wtr.write_record([metric, value.as_str()])?;
        }
        wtr.flush()?;
    }

    writeln!(out)?;
    writeln!(out, "# --- Time-Series Data ---")?;
    {
        let mut wtr = csv::Writer::from_writer(&mut out);
        wtr.write_record(["Timestamp", "QueueLength", "Utilization"])?;
        for snapshot in &output.snapshots {
            wtr.write_record([
                snapshot.timestamp.to_string(),
                snapshot.queue_length.to_string(),
                snapshot.utilization.to_string(),
            ])?;
        }
        wtr.flush()?;
    }

    out.flush()?;
    Ok(())
}
