use crate::metrics::SimulationResult;

pub(crate) fn export_to_json_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, results)?;
    Ok(())
}

pub(crate) fn import_from_json_impl(
    file: std::fs::File,
) -> Result<Vec<SimulationResult>, Box<dyn std::error::Error>> {
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
