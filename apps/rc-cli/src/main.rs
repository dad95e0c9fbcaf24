use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use rc_app::dashboard::{
    CostDiagnosis, CostReport, cost_report, fault_analysis, fleet_status, health_report,
};
use rc_app::{
    AppContext, AppError, AppResult, CycleReport, SeriesRun, cycle_service, fluid_service,
    plant_service, series_service,
};
use rc_core::units::{delta_k, k, temperature_c};
use rc_cycle::CycleSetpoint;
use rc_fluids::{FluidPoint, Quantity, parse_quantity};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "refcycle CLI - vapor-compression refrigeration cycle tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one refrigeration cycle
    Evaluate {
        /// Evaporation temperature (e.g. -25C, 248.15K, -13F)
        #[arg(long, allow_hyphen_values = true)]
        evap: String,
        /// Condensation temperature
        #[arg(long, allow_hyphen_values = true)]
        cond: String,
        /// Refrigerant id or alias (e.g. R404A, propane)
        #[arg(short, long)]
        refrigerant: String,
        /// Suction superheat (e.g. 5K)
        #[arg(long, default_value = "0K")]
        superheat: String,
        /// Liquid subcooling (e.g. 3K)
        #[arg(long, default_value = "0K")]
        subcooling: String,
        /// Compressor isentropic efficiency in (0, 1]; isentropic when omitted
        #[arg(long)]
        efficiency: Option<f64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported refrigerants
    Fluids {
        /// Filter by id, name or alias
        query: Option<String>,
    },
    /// Tabulate saturation properties
    Saturation {
        /// Refrigerant id or alias
        refrigerant: String,
        #[arg(long, default_value = "-40C", allow_hyphen_values = true)]
        from: String,
        #[arg(long, default_value = "40C", allow_hyphen_values = true)]
        to: String,
        #[arg(long, default_value_t = 9)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Single saturation point at this pressure instead of a table (e.g. 3bar)
        #[arg(long)]
        pressure: Option<String>,
    },
    /// Validate plant file syntax and structure
    Validate {
        /// Path to the plant YAML/JSON file
        plant_path: PathBuf,
    },
    /// List chambers in a plant
    Chambers {
        /// Path to the plant YAML/JSON file
        plant_path: PathBuf,
    },
    /// Generate synthetic operating history as CSV
    Generate {
        /// Path to the plant YAML/JSON file
        plant_path: PathBuf,
        /// Override the plant's RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the number of simulated days
        #[arg(long)]
        days: Option<u32>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dashboard reports over a freshly generated history
    #[command(subcommand)]
    Report(ReportCommands),
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Latest status per chamber
    Status { plant_path: PathBuf },
    /// Energy costs and projection
    Costs { plant_path: PathBuf },
    /// Health diagnostics
    Diagnostics { plant_path: PathBuf },
    /// Fault analysis for one chamber
    Fault {
        plant_path: PathBuf,
        chamber_id: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            evap,
            cond,
            refrigerant,
            superheat,
            subcooling,
            efficiency,
            json,
        } => cmd_evaluate(
            &evap,
            &cond,
            &refrigerant,
            &superheat,
            &subcooling,
            efficiency,
            json,
        ),
        Commands::Fluids { query } => cmd_fluids(query.as_deref().unwrap_or("")),
        Commands::Saturation {
            refrigerant,
            pressure: Some(pressure),
            ..
        } => cmd_saturation_at_pressure(&refrigerant, &pressure),
        Commands::Saturation {
            refrigerant,
            from,
            to,
            points,
            log,
            pressure: None,
        } => cmd_saturation(&refrigerant, &from, &to, points, log),
        Commands::Validate { plant_path } => cmd_validate(&plant_path),
        Commands::Chambers { plant_path } => cmd_chambers(&plant_path),
        Commands::Generate {
            plant_path,
            seed,
            days,
            output,
        } => cmd_generate(&plant_path, seed, days, output.as_deref()),
        Commands::Report(report) => match report {
            ReportCommands::Status { plant_path } => cmd_report_status(&plant_path),
            ReportCommands::Costs { plant_path } => cmd_report_costs(&plant_path),
            ReportCommands::Diagnostics { plant_path } => cmd_report_diagnostics(&plant_path),
            ReportCommands::Fault {
                plant_path,
                chamber_id,
            } => cmd_report_fault(&plant_path, &chamber_id),
        },
    }
}

fn parse_setpoint(
    evap: &str,
    cond: &str,
    refrigerant: &str,
    superheat: &str,
    subcooling: &str,
) -> AppResult<CycleSetpoint> {
    Ok(CycleSetpoint::new(
        k(parse_quantity(evap, Quantity::Temperature)?),
        k(parse_quantity(cond, Quantity::Temperature)?),
        refrigerant,
        delta_k(parse_quantity(superheat, Quantity::TemperatureDifference)?),
        delta_k(parse_quantity(subcooling, Quantity::TemperatureDifference)?),
    ))
}

fn cmd_evaluate(
    evap: &str,
    cond: &str,
    refrigerant: &str,
    superheat: &str,
    subcooling: &str,
    efficiency: Option<f64>,
    json: bool,
) -> AppResult<()> {
    let setpoint = parse_setpoint(evap, cond, refrigerant, superheat, subcooling)?;
    let ctx = AppContext::coolprop();
    let report = cycle_service::evaluate(&ctx, &setpoint, efficiency)?;

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::InvalidInput(format!("Failed to serialize report: {}", e)))?;
        println!("{}", text);
    } else {
        print_cycle_report(&report);
    }
    Ok(())
}

fn print_cycle_report(report: &CycleReport) {
    println!(
        "Cycle {}: evap {:.1} °C, cond {:.1} °C, superheat {:.1} K, subcooling {:.1} K, eta {:.3}",
        report.refrigerant,
        report.evaporation_c,
        report.condensation_c,
        report.superheat_k,
        report.subcooling_k,
        report.isentropic_efficiency
    );
    println!(
        "\n  {:<28} {:>10} {:>9} {:>10} {:>11} {:>8}",
        "State", "P [kPa]", "T [°C]", "h [kJ/kg]", "s [kJ/kgK]", "x"
    );
    for s in &report.states {
        let quality = s
            .quality
            .map(|x| format!("{:.3}", x))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<28} {:>10.1} {:>9.2} {:>10.2} {:>11.4} {:>8}",
            format!("{} ({})", s.point, s.label),
            s.pressure_kpa,
            s.temperature_c,
            s.enthalpy_kj_per_kg,
            s.entropy_kj_per_kg_k,
            quality
        );
    }
    println!("\n  Compressor work:  {:.2} kJ/kg", report.compressor_work_kj_per_kg);
    println!("  Evaporator heat:  {:.2} kJ/kg", report.evaporator_heat_kj_per_kg);
    println!("  Condenser heat:   {:.2} kJ/kg", report.condenser_heat_kj_per_kg);
    println!("  Pressure ratio:   {:.2}", report.pressure_ratio);
    println!("  Discharge temp:   {:.1} °C", report.discharge_temperature_c);
    println!("  COP:              {:.3}", report.cop);
}

fn cmd_fluids(query: &str) -> AppResult<()> {
    let ctx = AppContext::coolprop();
    let fluids = fluid_service::list_fluids(&ctx, query);
    if fluids.is_empty() {
        println!("No refrigerants match '{}'", query);
        return Ok(());
    }
    for fluid in fluids {
        let critical = fluid
            .critical_temperature_c
            .map(|t| format!("Tc {:.1} °C", t))
            .unwrap_or_else(|| "Tc n/a".to_string());
        println!(
            "  {:<8} {:<34} {:<6} {:<12} {}",
            fluid.id,
            fluid.name,
            if fluid.blend { "blend" } else { "pure" },
            critical,
            fluid.aliases.join(", ")
        );
    }
    Ok(())
}

fn cmd_saturation(
    refrigerant: &str,
    from: &str,
    to: &str,
    points: usize,
    log: bool,
) -> AppResult<()> {
    let ctx = AppContext::coolprop();
    let sweep = fluid_service::saturation_table(&ctx, refrigerant, from, to, points, log)?;

    println!("Saturation table: {}", sweep.refrigerant.display_name());
    println!(
        "  {:>8} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "T [°C]", "Pbub [kPa]", "Pdew [kPa]", "hl [kJ/kg]", "hv [kJ/kg]", "r [kJ/kg]"
    );
    for row in &sweep.rows {
        let t_c = temperature_c(k(row.temperature_k));
        match (&row.bubble, &row.dew) {
            (Some(bubble), Some(dew)) => println!(
                "  {:>8.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>10.2}",
                t_c,
                bubble.pressure_pa() / 1e3,
                dew.pressure_pa() / 1e3,
                bubble.enthalpy / 1e3,
                dew.enthalpy / 1e3,
                row.latent_heat().unwrap_or(f64::NAN) / 1e3
            ),
            _ => println!(
                "  {:>8.2}  failed: {}",
                t_c,
                row.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    if sweep.num_failed > 0 {
        println!("\n{} of {} points failed", sweep.num_failed, sweep.rows.len());
    }
    Ok(())
}

fn print_saturated(label: &str, point: &FluidPoint) {
    println!(
        "  {:<7} T {:>8.2} °C | h {:>8.2} kJ/kg | s {:>7.4} kJ/kgK",
        label,
        temperature_c(point.temperature),
        point.enthalpy / 1e3,
        point.entropy / 1e3
    );
}

fn cmd_saturation_at_pressure(refrigerant: &str, pressure: &str) -> AppResult<()> {
    let ctx = AppContext::coolprop();
    let (bubble, dew) = fluid_service::saturation_at_pressure(&ctx, refrigerant, pressure)?;

    println!(
        "Saturation of {} at {:.2} kPa",
        fluid_service::parse_refrigerant(refrigerant)?.display_name(),
        bubble.pressure_pa() / 1e3
    );
    print_saturated("bubble", &bubble);
    print_saturated("dew", &dew);
    println!(
        "  Glide {:.2} K, latent heat {:.2} kJ/kg",
        temperature_c(dew.temperature) - temperature_c(bubble.temperature),
        (dew.enthalpy - bubble.enthalpy) / 1e3
    );
    Ok(())
}

fn cmd_validate(plant_path: &Path) -> AppResult<()> {
    println!("Validating plant: {}", plant_path.display());
    let plant = plant_service::load_plant(plant_path)?;
    plant_service::validate_plant(&plant)?;
    println!("✓ Plant is valid");
    Ok(())
}

fn cmd_chambers(plant_path: &Path) -> AppResult<()> {
    let plant = plant_service::load_plant(plant_path)?;
    let chambers = plant_service::list_chambers(&plant);

    if chambers.is_empty() {
        println!("No chambers found in plant");
    } else {
        println!("Chambers in {}:", plant.name);
        for c in chambers {
            println!(
                "  {} - {} ({:.1} °C, {:.3} kg/s, {})",
                c.id, c.name, c.interior_setpoint_c, c.mass_flow_kgps, c.refrigerant
            );
        }
    }
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn session(plant_path: &Path) -> AppResult<AppContext> {
    let plant = plant_service::load_plant(plant_path)?;
    Ok(AppContext::coolprop().with_plant(plant))
}

fn generate(ctx: &AppContext) -> AppResult<SeriesRun> {
    let run = series_service::run_series(ctx, now())?;
    if run.failed > 0 {
        eprintln!("{} samples failed and were skipped", run.failed);
    }
    if run.truncated {
        eprintln!("Sample limit reached; history is truncated");
    }
    if run.records.is_empty() {
        return Err(AppError::NoRecords);
    }
    Ok(run)
}

fn cmd_generate(
    plant_path: &Path,
    seed: Option<u64>,
    days: Option<u32>,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut plant = plant_service::load_plant(plant_path)?;
    if let Some(seed) = seed {
        plant.generator.seed = seed;
    }
    if let Some(days) = days {
        plant.generator.days = days;
    }
    plant_service::validate_plant(&plant)?;
    let ctx = AppContext::coolprop().with_plant(plant);

    let run = generate(&ctx)?;
    let csv = series_service::records_to_csv(&run.records);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Generated {} records to {}",
            run.records.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_report_status(plant_path: &Path) -> AppResult<()> {
    let ctx = session(plant_path)?;
    let run = generate(&ctx)?;

    println!("FLEET STATUS");
    for chamber in fleet_status(&run.records, &ctx.plant()?.thresholds) {
        println!(
            "  [{:<6}] {:<22} T {:>6.1} °C | COP {:>5.2} | {:?} | {}",
            chamber.light.as_str(),
            chamber.equipment_id,
            chamber.interior_c,
            chamber.cop,
            chamber.mode,
            chamber.status
        );
    }
    Ok(())
}

fn print_cost_diagnosis(report: &CostReport) {
    let Some(diagnosis) = &report.diagnosis else {
        println!("  Projection available with at least 4 h of data");
        return;
    };
    let currency = &report.currency;
    match diagnosis {
        CostDiagnosis::CriticalFailure {
            daily_overrun,
            monthly_loss,
        } => {
            println!("  CRITICAL FAILURE");
            println!("  Daily overrun:  {:.0} {}", daily_overrun, currency);
            println!("  Monthly loss:   {:.0} {}", monthly_loss, currency);
            println!("  Action: check refrigerant charge, condenser and valves");
        }
        CostDiagnosis::EarlyWarning { daily_overrun } => {
            println!("  EARLY WARNING");
            println!("  Estimated overrun: {:.0} {}/day", daily_overrun, currency);
            println!("  Action: check condenser cleanliness");
        }
        CostDiagnosis::ExceptionalSavings => {
            println!("  EXCEPTIONAL SAVINGS: high efficiency, favourable weather");
        }
        CostDiagnosis::CriticalUnits { equipment_ids } => {
            println!("  UNITS IN CRITICAL STATE");
            for id in equipment_ids {
                println!("    {}: low COP, inspect system", id);
            }
            if report.deviation_pct.is_some_and(|d| d < 0.0) {
                println!("  Note: negative deviation reflects partial data for today");
            }
        }
        CostDiagnosis::Normal => println!("  NORMAL OPERATION"),
    }
}

fn cmd_report_costs(plant_path: &Path) -> AppResult<()> {
    let ctx = session(plant_path)?;
    let run = generate(&ctx)?;
    let report = cost_report(&run.records, &ctx.plant()?.tariff, run.step_hours)?;
    let currency = &report.currency;

    println!("COSTS");
    println!("  Accumulated:      {:.0} {}", report.total_cost, currency);
    println!(
        "  Daily mean:       {:.0} {} over {} day(s)",
        report.historical_daily_mean, currency, report.historical_days
    );
    println!("\nTODAY ({})", report.today);
    println!("  Hours with data:  {:.0} h", report.hours_with_data);
    println!("  Spend so far:     {:.0} {}", report.today_cost, currency);
    if let (Some(projection), Some(deviation), Some(verdict)) =
        (report.projection_24h, report.deviation_pct, report.verdict)
    {
        println!("  24 h projection:  {:.0} {}", projection, currency);
        println!("  Deviation:        {:+.1} % ({})", deviation, verdict.label());
    }
    println!();
    print_cost_diagnosis(&report);
    println!(
        "\n  Mean COP today: {:.2} ({:?})",
        report.mean_cop_today, report.cop_grade
    );
    println!("\nPer unit:");
    for unit in &report.units {
        println!(
            "  [{}] {:<22} {:>8.0} {} | COP {:.2}",
            if unit.critical { "red" } else { "ok " },
            unit.equipment_id,
            unit.cost,
            currency,
            unit.mean_cop
        );
    }
    Ok(())
}

fn cmd_report_diagnostics(plant_path: &Path) -> AppResult<()> {
    let ctx = session(plant_path)?;
    let run = generate(&ctx)?;
    let thresholds = &ctx.plant()?.thresholds;
    let report = health_report(&run.records, thresholds)?;

    println!("HEALTH DIAGNOSTICS");
    if report.discharge_anomalies > 0 {
        println!(
            "  TECHNICAL ALERT: {} records with discharge above {:.0} °C (compressor risk)",
            report.discharge_anomalies, thresholds.discharge_limit_c
        );
    } else {
        println!("  Compressor discharge: nominal");
    }
    println!("\nPer unit:");
    for unit in &report.units {
        if unit.stable {
            println!("  [ok ] {:<22} stable | COP {:.2}", unit.equipment_id, unit.mean_cop);
        } else {
            println!(
                "  [red] {:<22} {} alarms | COP {:.2}",
                unit.equipment_id, unit.alarms, unit.mean_cop
            );
        }
    }
    println!("\nFleet summary:");
    for share in &report.distribution {
        println!("  {:<8} {:>5} ({:.1} %)", share.status.as_str(), share.count, share.percent);
    }
    Ok(())
}

fn cmd_report_fault(plant_path: &Path, chamber_id: &str) -> AppResult<()> {
    let ctx = session(plant_path)?;
    let plant = ctx.plant()?;
    plant_service::get_chamber(plant, chamber_id)?;
    let run = generate(&ctx)?;

    let Some(fault) = fault_analysis(&run.records, chamber_id, run.step_hours, &plant.thresholds)?
    else {
        println!("{}: no alarms recorded in the period", chamber_id);
        return Ok(());
    };
    let flag = |bad: bool| if bad { "!" } else { " " };
    let (lo, hi) = fault.cop_target;

    println!("FAULT ANALYSIS {}", fault.equipment_id);
    println!("  First alarm:     {}", fault.first_alarm.format("%Y-%m-%d %H:%M"));
    println!("  Alarm records:   {}", fault.alarm_count);
    println!("  Estimated span:  ~{:.0} h", fault.estimated_hours);
    println!(
        "{} Mean COP:        {:.2} (target {:.1}-{:.1})",
        flag(fault.mean_cop_low()),
        fault.mean_cop,
        lo,
        hi
    );
    println!(
        "{} Min COP:         {:.2} (target {:.1}-{:.1})",
        flag(fault.min_cop_failing()),
        fault.min_cop,
        lo,
        hi
    );
    println!(
        "{} Max discharge:   {:.1} °C (limit {:.0} °C)",
        flag(fault.discharge_over_limit()),
        fault.max_discharge_c,
        fault.thresholds.discharge_limit_c
    );
    println!(
        "  Condenser ΔT:    {:.1} K (design {:.0} K)",
        fault.mean_delta_t_k, plant.generator.base_delta_t_k
    );
    if !fault.causes.is_empty() {
        println!("\nProbable causes:");
        for cause in &fault.causes {
            println!("  - {}", cause.describe());
        }
    }
    println!("\nAction: physical inspection required");
    Ok(())
}
