//! Output formatting module

use truckcare_app::app::{CategoryOptions, RecordPage};
use truckcare_domain::model::{PredictionResult, TruckRecord};
use truckcare_domain::service::SummaryStats;
use truckcare_types::{OutputFormat, Result, RiskBucket};

fn opt_num(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "-".to_string())
}

fn opt_text(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn output_prediction(output_format: OutputFormat, result: &PredictionResult) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(result)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nMaintenance Prediction");
    println!("======================");
    println!("Truck:           {}", result.plate);
    println!("Days to service: {:.1}", result.predicted_days);
    println!("Hours:           {:.0}", result.predicted_hours);
    println!("Risk:            {}", result.risk_bucket);
    println!("Model:           {}", result.model_version);

    println!("\n--- Sensor Health ---");
    for (sensor, badge) in &result.sensor_badges {
        println!("{} {}", badge.marker(), sensor.label());
    }
    println!("---------------------");

    if !result.range_warnings.is_empty() {
        println!("\nOut-of-range readings (clamped for the model):");
        for w in &result.range_warnings {
            println!("  {}: {} -> {}", w.sensor.label(), w.value, w.clamped_to);
        }
    }

    let critical = result.critical_sensors();
    if !critical.is_empty() {
        let names: Vec<&str> = critical.iter().map(|s| s.label()).collect();
        println!("\nCritical sensors: {}", names.join(", "));
    }

    Ok(())
}

pub fn output_history(output_format: OutputFormat, plate: &str, rows: &[TruckRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No service history for {}", plate.trim());
        return Ok(());
    }

    println!("\nService history for {} ({} rows)", plate.trim(), rows.len());
    print_rows(rows, false);
    Ok(())
}

pub fn output_records(output_format: OutputFormat, page: &RecordPage) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.records.is_empty() {
        println!("No records at offset {} ({} total)", page.offset, page.total);
        return Ok(());
    }

    println!(
        "\nRecords {}-{} of {}",
        page.offset + 1,
        page.offset + page.records.len(),
        page.total
    );
    print_rows(&page.records, true);

    Ok(())
}

fn print_rows(rows: &[TruckRecord], with_plate: bool) {
    let plate_col = |plate: &str| {
        if with_plate {
            format!("{:<12} ", plate)
        } else {
            String::new()
        }
    };
    let header = plate_col("Plate");
    println!(
        "{}{:<12} {:<10} {:<10} {:>10} {:>8} {:>6} {:>6} {:>6}",
        header, "Date", "Record", "Route", "Km since", "Engine", "Oil%", "Tyre%", "Days"
    );
    println!("{}", "-".repeat(76 + header.len()));
    for row in rows {
        println!(
            "{}{:<12} {:<10} {:<10} {:>10} {:>8} {:>6} {:>6} {:>6}",
            plate_col(&row.plate),
            row.service_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            opt_text(row.record_id.as_deref()),
            opt_text(row.route_type.as_deref()),
            opt_num(row.km_after_last_service, 0),
            opt_num(row.engine_temperature_c, 1),
            opt_num(row.oil_life_percent, 0),
            opt_num(row.tyre_health_percent, 0),
            opt_num(row.days_until_next_service, 0),
        );
    }
}

pub fn output_dashboard(output_format: OutputFormat, stats: &SummaryStats) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("\nFleet Dashboard");
    println!("===============");
    println!("Records:               {}", stats.record_count);
    println!("Trucks:                {}", stats.distinct_plates);
    println!(
        "Mean days to service:  {}",
        opt_num(stats.mean_days_until_service, 1)
    );
    println!(
        "Mean predicted days:   {}",
        opt_num(stats.mean_predicted_days, 1)
    );
    println!(
        "Mean km since service: {}",
        opt_num(stats.mean_km_after_last_service, 0)
    );
    println!(
        "Critical trucks:       {}",
        stats
            .critical_fraction
            .map(|f| format!("{:.1}%", f * 100.0))
            .unwrap_or_else(|| "-".to_string())
    );

    println!("\n--- Risk (latest row per truck) ---");
    for bucket in RiskBucket::ALL {
        let count = stats.risk_distribution.get(&bucket).copied().unwrap_or(0);
        println!("{:<10} {}", bucket.label(), count);
    }

    if !stats.days_histogram.is_empty() {
        println!("\n--- Days until service ---");
        for bin in &stats.days_histogram {
            let range = if bin.overflow {
                format!("{:.0}+", bin.start)
            } else {
                format!("{:.0}-{:.0}", bin.start, bin.end)
            };
            println!("{:>11} {:>5} {}", range, bin.count, "#".repeat(bin.count.min(60)));
        }
    }

    let heatmap = &stats.temperature_vibration_heatmap;
    if heatmap.total() > 0 {
        println!("\n--- Engine temp (rows) x vibration (columns) ---");
        for (i, row) in heatmap.counts.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|c| format!("{:>3}", c)).collect();
            println!(
                "{:>5.0}-{:<5.0} {}",
                heatmap.engine_edges[i],
                heatmap.engine_edges[i + 1],
                cells.join(" ")
            );
        }
    }

    Ok(())
}

pub fn output_options(
    output_format: OutputFormat,
    options: &[CategoryOptions],
    plates: Option<&[String]>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::json!({
            "categories": options,
            "plates": plates,
        });
        println!("{}", serde_json::to_string_pretty(&content)?);
        return Ok(());
    }

    for option in options {
        let values = if option.values.is_empty() {
            "(none)".to_string()
        } else {
            option.values.join(", ")
        };
        println!("{:<28} {}", option.field.name(), values);
    }

    if let Some(plates) = plates {
        println!("\nKnown plates ({}):", plates.len());
        for plate in plates {
            println!("  {}", plate);
        }
    }

    Ok(())
}
