use crate::metrics::SimulationResult;
use crate::parameters::ParameterSet;

use super::writer_utils::optional;

/// Column order of the comparison table. The first eleven columns are the
/// classic `summary_all_runs.csv` layout; the rest are extras.
const HEADER: [&str; 26] = [
    "RunID",
    "NumDoctors",
    "ArrivalRate",
    "ServiceRate",
    "AvgWaitingTime_Low",
    "AvgWaitingTime_Medium",
    "AvgWaitingTime_High",
    "AvgQueueLength",
    "AvgSystemTime",
    "ResourceUtilization",
    "Throughput",
    "ExperimentID",
    "Replication",
    "Seed",
    "ServiceDistribution",
    "SimulationDuration",
    "SeverityWeights",
    "SamplingInterval",
    "PatientsArrived",
    "PatientsCompleted",
    "MaxWaitingTime_Low",
    "MaxWaitingTime_Medium",
    "MaxWaitingTime_High",
    "MedianWaitingTime",
    "P90WaitingTime",
    "OfferedLoad",
];

pub(crate) fn export_to_csv_impl(
    results: &[SimulationResult],
    parameter_sets: &[ParameterSet],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    if results.len() != parameter_sets.len() {
        return Err(format!(
            "Results length ({}) doesn't match parameter_sets length ({})",
            results.len(),
            parameter_sets.len()
        )
        .into());
    }

    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(HEADER)?;

    for (result, param_set) in results.iter().zip(parameter_sets.iter()) {
        let weights = param_set
            .params
            .severity_weights
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(";");

        wtr.write_record([
            result.run_id.to_string(),
            result.num_doctors.to_string(),
            result.arrival_rate.to_string(),
            result.service_rate.to_string(),
            optional(result.avg_wait_low),
            optional(result.avg_wait_medium),
            optional(result.avg_wait_high),
            optional(result.avg_queue_length),
            optional(result.avg_system_time),
            optional(result.resource_utilization),
            optional(result.throughput),
            result.experiment_id.clone(),
            result.replication.to_string(),
            result.seed.to_string(),
            result.service_distribution.clone(),
            result.simulation_duration.to_string(),
            weights,
            param_set.params.sampling_interval.to_string(),
            result.patients_arrived.to_string(),
            result.patients_completed.to_string(),
            optional(result.max_wait_low),
            optional(result.max_wait_medium),
            optional(result.max_wait_high),
            optional(result.median_wait),
            optional(result.p90_wait),
            result.offered_load.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
