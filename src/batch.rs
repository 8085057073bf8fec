//! CSV batch processing of point pairs
//!
//! Input rows carry `from_lat,from_lon,to_lat,to_lon` and an optional
//! `name`. Rows that fail to parse or hold out-of-range angles are skipped
//! and counted; every other row is solved with the engine's inverse solver.

use std::io::{Read, Write};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::geodesy::{GeoPoint, GeodesyEngine, InverseSolution, PointFactory};

/// One input row
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteRecord {
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl RouteRecord {
    pub fn start(&self) -> GeoPoint {
        GeoPoint::new(self.from_lat, self.from_lon)
    }

    pub fn end(&self) -> GeoPoint {
        GeoPoint::new(self.to_lat, self.to_lon)
    }
}

/// One output row
#[derive(Debug, Serialize)]
struct RouteResult<'a> {
    from_lat: f64,
    from_lon: f64,
    to_lat: f64,
    to_lon: f64,
    name: &'a str,
    distance: f64,
    initial_bearing: f64,
    final_bearing: f64,
    converged: bool,
}

/// Outcome of a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub total_rows: usize,
    pub solved: usize,
    pub skipped: usize,
    pub not_converged: usize,
    pub execution_time_ms: f64,
}

/// Reads route rows, returning the usable ones and the number skipped
pub fn read_routes<R: Read>(reader: R) -> (Vec<RouteRecord>, usize) {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut routes = Vec::new();
    let mut skipped = 0;

    for (index, result) in csv_reader.deserialize::<RouteRecord>().enumerate() {
        // header is line 1
        let line = index + 2;
        match result {
            Ok(route) => match route.start().validate().and_then(|_| route.end().validate()) {
                Ok(()) => routes.push(route),
                Err(e) => {
                    warn!(line, error = %e, "skipping route with invalid coordinates");
                    skipped += 1;
                }
            },
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable route row");
                skipped += 1;
            }
        }
    }

    (routes, skipped)
}

/// Solves every route in parallel, preserving order
pub fn solve_routes<F>(engine: &GeodesyEngine<F>, routes: &[RouteRecord]) -> Vec<InverseSolution>
where
    F: PointFactory + Sync,
{
    let pairs: Vec<(GeoPoint, GeoPoint)> = routes.iter().map(|route| (route.start(), route.end())).collect();
    engine.inverse_many(&pairs)
}

/// Writes one result row per route
pub fn write_results<W: Write>(writer: W, routes: &[RouteRecord], solutions: &[InverseSolution]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (route, solution) in routes.iter().zip(solutions) {
        csv_writer.serialize(RouteResult {
            from_lat: route.from_lat,
            from_lon: route.from_lon,
            to_lat: route.to_lat,
            to_lon: route.to_lon,
            name: route.name.as_deref().unwrap_or(""),
            distance: solution.distance,
            initial_bearing: solution.initial_bearing,
            final_bearing: solution.final_bearing,
            converged: solution.converged,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Runs a whole batch: CSV in, statistics header plus CSV rows out
pub fn process_csv<F>(engine: &GeodesyEngine<F>, csv_data: &[u8]) -> Result<(BatchReport, String)>
where
    F: PointFactory + Sync,
{
    let start = Instant::now();

    let (routes, skipped) = read_routes(csv_data);
    let solutions = solve_routes(engine, &routes);

    let mut rows = Vec::with_capacity(routes.len() * 96);
    write_results(&mut rows, &routes, &solutions)?;

    let report = BatchReport {
        total_rows: routes.len() + skipped,
        solved: routes.len(),
        skipped,
        not_converged: solutions.iter().filter(|s| !s.converged).count(),
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    info!(
        total = report.total_rows,
        solved = report.solved,
        skipped = report.skipped,
        not_converged = report.not_converged,
        elapsed_ms = report.execution_time_ms,
        "batch processed"
    );

    let mut output = String::with_capacity(rows.len() + 256);
    output.push_str("# Statistics\n");
    output.push_str(&format!("# Total rows: {}\n", report.total_rows));
    output.push_str(&format!("# Solved: {}\n", report.solved));
    output.push_str(&format!("# Skipped: {}\n", report.skipped));
    output.push_str(&format!("# Not converged: {}\n", report.not_converged));
    output.push_str(&format!("# Execution time: {:.2} ms\n", report.execution_time_ms));
    output.push_str(&String::from_utf8_lossy(&rows));

    Ok((report, output))
}
