use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::{ErrorRes, QsofaInsufficientRes};
use sepsis_core::{
    Calculator, ConsciousnessLevel, EngineConfig, News2Inputs, QsofaInputs, ScoringError, ScoringService,
    SepticShockInputs, SofaInputs, Spo2Scale, ValidationPolicy, VasopressorDoses, VitalSignSnapshot,
};

#[derive(Parser)]
#[command(name = "sepsis")]
#[command(about = "Sepsis scoring engine CLI")]
struct Cli {
    /// Score out-of-range measurements instead of rejecting them
    #[arg(long, global = true)]
    lenient: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a SOFA score
    Sofa {
        /// PaO2/FiO2 ratio (mmHg)
        #[arg(long)]
        pao2_fio2: f64,
        /// Platelets (x10^3/uL)
        #[arg(long)]
        platelets: f64,
        /// Bilirubin (mg/dL)
        #[arg(long)]
        bilirubin: f64,
        /// Mean arterial pressure (mmHg)
        #[arg(long)]
        map: f64,
        /// Glasgow Coma Scale
        #[arg(long)]
        gcs: u8,
        /// Creatinine (mg/dL)
        #[arg(long)]
        creatinine: f64,
        /// Patient is on mechanical ventilation or other respiratory support
        #[arg(long)]
        respiratory_support: bool,
        /// Dopamine dose (mcg/kg/min)
        #[arg(long, default_value_t = 0.0)]
        dopamine: f64,
        /// Dobutamine dose (mcg/kg/min)
        #[arg(long, default_value_t = 0.0)]
        dobutamine: f64,
        /// Epinephrine dose (mcg/kg/min)
        #[arg(long, default_value_t = 0.0)]
        epinephrine: f64,
        /// Norepinephrine dose (mcg/kg/min)
        #[arg(long, default_value_t = 0.0)]
        norepinephrine: f64,
        /// Urine output (mL/day, optional)
        #[arg(long)]
        urine_output: Option<f64>,
        /// Baseline SOFA score
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        baseline_sofa: i32,
    },
    /// Compute a qSOFA score
    Qsofa {
        /// Respiratory rate (/min)
        #[arg(long)]
        respiratory_rate: Option<f64>,
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        systolic_bp: Option<f64>,
        /// Glasgow Coma Scale
        #[arg(long)]
        gcs: Option<u8>,
        /// Whether infection is suspected
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        suspected_infection: bool,
    },
    /// Compute a NEWS2 score
    News2 {
        /// Respiratory rate (/min)
        #[arg(long)]
        respiratory_rate: u32,
        /// Oxygen saturation (%)
        #[arg(long)]
        oxygen_saturation: u32,
        /// SpO2 scale (1 or 2)
        #[arg(long, default_value = "1")]
        spo2_scale: Spo2Scale,
        /// Patient is on supplemental oxygen
        #[arg(long)]
        supplemental_oxygen: bool,
        /// Systolic blood pressure (mmHg)
        #[arg(long)]
        systolic_bp: u32,
        /// Heart rate (/min)
        #[arg(long)]
        heart_rate: u32,
        /// AVPU level: alert, voice, pain or unresponsive
        #[arg(long, default_value = "alert")]
        consciousness: ConsciousnessLevel,
        /// Temperature (degrees C)
        #[arg(long)]
        temperature: f64,
        /// Age (years)
        #[arg(long)]
        age: u32,
    },
    /// Assess septic shock
    SepticShock {
        /// Mean arterial pressure (mmHg)
        #[arg(long)]
        map: f64,
        /// Serum lactate (mmol/L)
        #[arg(long)]
        lactate: f64,
        /// Patient is on vasopressors
        #[arg(long)]
        on_vasopressors: bool,
        /// Adequate volume resuscitation has been given
        #[arg(long)]
        adequate_volume_resuscitation: bool,
        /// Sepsis is present
        #[arg(long)]
        sepsis_present: bool,
    },
    /// Score a JSON vital-sign snapshot with one calculator
    Snapshot {
        /// Calculator: sofa, qsofa, news2 or septic-shock
        calculator: Calculator,
        /// Path to the snapshot JSON file
        file: PathBuf,
    },
}

fn pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Run one calculator and render its result, or the error envelope, as pretty JSON.
fn run(service: &ScoringService, command: Commands) -> Result<String, String> {
    let outcome = match command {
        Commands::Sofa {
            pao2_fio2,
            platelets,
            bilirubin,
            map,
            gcs,
            creatinine,
            respiratory_support,
            dopamine,
            dobutamine,
            epinephrine,
            norepinephrine,
            urine_output,
            baseline_sofa,
        } => service
            .sofa(&SofaInputs {
                pao2_fio2,
                platelets,
                bilirubin,
                map_mmhg: map,
                gcs,
                creatinine,
                respiratory_support,
                vasopressors: VasopressorDoses {
                    dopamine,
                    dobutamine,
                    epinephrine,
                    norepinephrine,
                },
                urine_output_ml_day: urine_output,
                baseline_sofa,
            })
            .map(|r| pretty(&r)),
        Commands::Qsofa {
            respiratory_rate,
            systolic_bp,
            gcs,
            suspected_infection,
        } => service
            .qsofa(&QsofaInputs {
                respiratory_rate,
                systolic_bp,
                gcs,
                suspected_infection,
            })
            .map(|r| pretty(&r)),
        Commands::News2 {
            respiratory_rate,
            oxygen_saturation,
            spo2_scale,
            supplemental_oxygen,
            systolic_bp,
            heart_rate,
            consciousness,
            temperature,
            age,
        } => service
            .news2(&News2Inputs {
                respiratory_rate,
                oxygen_saturation,
                spo2_scale,
                supplemental_oxygen,
                systolic_bp,
                heart_rate,
                level_of_consciousness: consciousness,
                temperature,
                age,
            })
            .map(|r| pretty(&r)),
        Commands::SepticShock {
            map,
            lactate,
            on_vasopressors,
            adequate_volume_resuscitation,
            sepsis_present,
        } => service
            .septic_shock(&SepticShockInputs {
                map_mmhg: map,
                lactate_mmol_l: lactate,
                on_vasopressors,
                adequate_volume_resuscitation,
                sepsis_present,
            })
            .map(|r| pretty(&r)),
        Commands::Snapshot { calculator, file } => {
            let snapshot = load_snapshot(&file)?;
            service
                .score_snapshot(calculator, &snapshot)
                .map(|r| pretty(&r))
        }
    };

    match outcome {
        Ok(rendered) => rendered.map_err(|e| e.to_string()),
        Err(err @ ScoringError::MissingInput {
            calculator: Calculator::Qsofa,
            ..
        }) => {
            let body = QsofaInsufficientRes::new(&err);
            Err(pretty(&body).unwrap_or_else(|_| body.error))
        }
        Err(err) => Err(pretty(&ErrorRes::from(&err)).unwrap_or_else(|_| err.to_string())),
    }
}

fn load_snapshot(file: &Path) -> Result<VitalSignSnapshot, String> {
    let body = |error: String| {
        let res = ErrorRes {
            error,
            fields: Vec::new(),
        };
        pretty(&res).unwrap_or(res.error)
    };
    let text = std::fs::read_to_string(file)
        .map_err(|e| body(format!("cannot read {}: {}", file.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| body(format!("invalid snapshot in {}: {}", file.display(), e)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sepsis_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let validation = if cli.lenient {
        ValidationPolicy::Lenient
    } else {
        ValidationPolicy::Strict
    };
    let service = ScoringService::new(Arc::new(EngineConfig::new(validation)));

    match cli.command {
        Some(command) => match run(&service, command) {
            Ok(output) => println!("{}", output),
            Err(output) => {
                eprintln!("{}", output);
                std::process::exit(1);
            }
        },
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
