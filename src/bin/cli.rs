use chrono::Datelike;
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::Path;
use ta_planner::schedule::i32_to_date;
use ta_planner::{
    Country, PlannerConfig, ScheduleResult, TaPlanner, export_file_name, logging,
    save_schedule_to_csv, save_schedule_to_dir,
};

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Date(days) => i32_to_date(*days).format("%Y-%m-%d").to_string(),
        AnyValue::Boolean(true) => "<<".to_string(),
        AnyValue::Boolean(false) => String::new(),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| cell_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        rows.push(row);
    }

    // Compute column widths
    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &rows {
        for (ci, s) in row.iter().enumerate() {
            if s.len() > widths[ci] {
                widths[ci] = s.len();
            }
        }
    }

    // Build horizontal separator
    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |cells: &[String]| {
        let mut line = String::from("|");
        for (i, s) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(s);
            line.push_str(&" ".repeat(widths[i].saturating_sub(s.len())));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  countries                          List fabric and sewing origins\n  leadtimes                          Show configured lead times\n  calc [YYYY-MM-DD] [fabric] [sewing]\n                                     Back-calculate the T&A plan (defaults 2026-09-14 CHINA VIETNAM)\n  show                               Show the last computed plan\n  export [dir|file.csv]              Export the last plan as CSV\n  holidays <country> <year>          List non-working dates for a country\n  compare [YYYY-MM-DD]               Compare every fabric/sewing pair\n  quit|exit                          Exit"
    );
}

fn print_countries() {
    let join = |list: &[Country]| {
        list.iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("Fabric origins : {}", join(&Country::FABRIC_ORIGINS));
    println!("Sewing origins : {}", join(&Country::SEWING_ORIGINS));
}

fn print_lead_times(planner: &TaPlanner) {
    let lt = planner.config().lead_times;
    println!("DC to store        : {} calendar days", lt.dc_to_store_days);
    println!("Shipping           : {} calendar days", lt.shipping_days);
    println!("Handover           : {} working days", lt.handover_working_days);
    println!("Sewing             : {} working days", lt.sewing_working_days);
    println!(
        "Fabric transit     : {} days cross-border, {} days domestic",
        lt.cross_border_transit_days, lt.domestic_transit_days
    );
    println!("Fabric production  : {} working days", lt.fabric_working_days);
}

fn print_schedule(planner: &TaPlanner, schedule: &ScheduleResult) {
    println!("Final booking deadline: {}", schedule.booking_date());
    println!(
        "Total lead time: {} days | Holiday delay: {} days | Fabric/Sewing: {} / {}",
        schedule.total_lead_time_days,
        schedule.total_delay_days,
        schedule.fabric_country,
        schedule.sewing_country
    );
    match schedule.to_dataframe() {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error rendering schedule: {}", e),
    }
    if let Some(warning) = planner.holiday_warning(schedule) {
        println!("WARNING: {}", warning);
    }
}

fn main() {
    logging::init();

    let planner = match PlannerConfig::from_env().and_then(TaPlanner::from_config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        }
    };
    let mut last: Option<ScheduleResult> = None;

    println!("T&A Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "countries" => print_countries(),
            "leadtimes" => print_lead_times(&planner),
            "calc" => {
                let default_date = TaPlanner::default_in_store_date().to_string();
                let date_s = parts.next().unwrap_or(default_date.as_str());
                let fabric_s = parts.next().unwrap_or(Country::FABRIC_ORIGINS[0].code());
                let sewing_s = parts.next().unwrap_or(Country::SEWING_ORIGINS[0].code());
                match planner.plan_from_strs(date_s, fabric_s, sewing_s) {
                    Ok(schedule) => {
                        print_schedule(&planner, &schedule);
                        last = Some(schedule);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "show" => match &last {
                Some(schedule) => print_schedule(&planner, schedule),
                None => println!("No schedule yet. Run 'calc' first."),
            },
            "export" => {
                let Some(schedule) = &last else {
                    println!("No schedule yet. Run 'calc' first.");
                    continue;
                };
                let target = parts.next().unwrap_or(".");
                let result = if target.to_ascii_lowercase().ends_with(".csv") {
                    save_schedule_to_csv(schedule, target).map(|_| Path::new(target).to_path_buf())
                } else {
                    save_schedule_to_dir(schedule, target)
                };
                match result {
                    Ok(path) => println!("Schedule exported to {}.", path.display()),
                    Err(e) => println!(
                        "Error exporting {}: {}",
                        export_file_name(schedule.in_store_date),
                        e
                    ),
                }
            }
            "holidays" => {
                let country_s = parts.next();
                let year_s = parts.next();
                match (country_s, year_s) {
                    (Some(country_s), Some(year_s)) => {
                        let country: Country = match country_s.parse() {
                            Ok(c) => c,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        let year: i32 = match year_s.parse() {
                            Ok(y) => y,
                            Err(_) => {
                                println!("Invalid year");
                                continue;
                            }
                        };
                        let set = planner.holidays(year, country);
                        let dates = set.dates_in_year(year);
                        println!(
                            "{} non-working holiday dates in {} for {} (buffers included):",
                            dates.len(),
                            year,
                            country
                        );
                        let mut month = 0;
                        for date in dates {
                            if date.month() != month {
                                month = date.month();
                                print!("\n  ");
                            }
                            print!("{} ", date.format("%m-%d"));
                        }
                        println!();
                    }
                    _ => println!("Usage: holidays <country> <year>"),
                }
            }
            "compare" => {
                let date = match parts.next() {
                    Some(s) => match TaPlanner::parse_date(s) {
                        Ok(d) => d,
                        Err(e) => {
                            println!("Error: {}", e);
                            continue;
                        }
                    },
                    None => TaPlanner::default_in_store_date(),
                };
                match planner.compare(date) {
                    Ok(results) => {
                        println!("Sourcing options for in-store {} (latest booking first):", date);
                        for schedule in results {
                            println!(
                                "  {:<10} -> {:<10} booking {}  lead {:>3}d  delay {:>2}d",
                                schedule.fabric_country.code(),
                                schedule.sewing_country.code(),
                                schedule.booking_date(),
                                schedule.total_lead_time_days,
                                schedule.total_delay_days
                            );
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
