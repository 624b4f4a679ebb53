//! # Splice CLI Application
//!
//! Terminal front end for the beam splice sizing engine. Loads the beam and
//! steel catalogs (built-in or CSV), builds a request from the command line
//! or a JSON file, and prints a report followed by the JSON result.
//!
//! ```text
//! splice_cli --beam 40 --steel С255 --moment 200 --shear 100
//! splice_cli --h 400 --b 200 --s 8 --t 12 --yield-strength 240 --moment 200 --json
//! splice_cli --request joint.json --beam-catalog двутавр.csv --steel-catalog сталь.csv
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use splice_core::calculations::{size_joint_with, BeamRef, ConnectionRequest, JointResult, PlateDesign, SteelRef};
use splice_core::materials::{
    builtin_i_beams, builtin_steels, BeamCatalog, BeamSection, SteelCatalog, SteelGrade,
};
use splice_core::settings::DesignSettings;

#[derive(Parser, Debug)]
#[command(name = "splice_cli", version, about = "Bolted I-beam splice sizing")]
struct Args {
    /// JSON file with a complete connection request
    #[arg(long, conflicts_with_all = ["beam", "h", "steel", "yield_strength", "moment"])]
    request: Option<PathBuf>,

    /// Beam identifier in the catalog
    #[arg(long, conflicts_with = "h")]
    beam: Option<String>,

    /// Inline beam depth h (mm)
    #[arg(long, requires_all = ["b", "s", "t"])]
    h: Option<f64>,
    /// Inline flange width b (mm)
    #[arg(long)]
    b: Option<f64>,
    /// Inline web thickness s (mm)
    #[arg(long)]
    s: Option<f64>,
    /// Inline flange thickness t (mm)
    #[arg(long)]
    t: Option<f64>,

    /// Steel grade in the catalog
    #[arg(long, default_value = "С255", conflicts_with = "yield_strength")]
    steel: String,

    /// Inline steel yield strength Ry (MPa)
    #[arg(long)]
    yield_strength: Option<f64>,

    /// Design bending moment M_max (kN·m)
    #[arg(long)]
    moment: Option<f64>,

    /// Design shear force Q (kN)
    #[arg(long, default_value_t = 0.0)]
    shear: f64,

    /// Responsibility level: Пониженный, Нормальный, Повышенный
    #[arg(long, default_value = "Нормальный")]
    responsibility: String,

    /// Beam catalog CSV (Номер двутавра,h,b,s,t); built-in GOST 8239 list otherwise
    #[arg(long)]
    beam_catalog: Option<PathBuf>,

    /// Steel catalog CSV (Сталь,Предел текучести); built-in list otherwise
    #[arg(long)]
    steel_catalog: Option<PathBuf>,

    /// TOML file overriding the design settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print only the JSON result
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        if let Some(core) = err.downcast_ref::<splice_core::SpliceError>() {
            if let Ok(json) = serde_json::to_string_pretty(core) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let beams = match &args.beam_catalog {
        Some(path) => BeamCatalog::load_from_csv(&path.to_string_lossy())
            .with_context(|| format!("loading beam catalog {}", path.display()))?,
        None => builtin_i_beams(),
    };
    let steels = match &args.steel_catalog {
        Some(path) => SteelCatalog::load_from_csv(&path.to_string_lossy())
            .with_context(|| format!("loading steel catalog {}", path.display()))?,
        None => builtin_steels(),
    };
    let settings = match &args.settings {
        Some(path) => DesignSettings::load(&path.to_string_lossy())
            .with_context(|| format!("loading settings {}", path.display()))?,
        None => DesignSettings::default(),
    };
    info!("{} beams, {} steels in catalogs", beams.len(), steels.len());

    let request = build_request(args)?;
    let result = size_joint_with(&request, &beams, &steels, &settings)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_report(&request, &result);
    println!();
    println!("JSON Output (for API use):");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn build_request(args: &Args) -> Result<ConnectionRequest> {
    if let Some(path) = &args.request {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let request: ConnectionRequest =
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        return Ok(request);
    }

    let beam_ref = match (&args.beam, args.h, args.b, args.s, args.t) {
        (Some(id), ..) => BeamRef::Catalog(id.clone()),
        (None, Some(h), Some(b), Some(s), Some(t)) => BeamRef::Custom(BeamSection::new(h, b, s, t)),
        _ => bail!("give either --beam <ID> or all of --h --b --s --t"),
    };
    let steel_ref = match args.yield_strength {
        Some(ry) => SteelRef::Custom(SteelGrade::new(ry)),
        None => SteelRef::Catalog(args.steel.clone()),
    };
    let Some(m_max) = args.moment else {
        bail!("--moment is required unless --request is given");
    };

    Ok(ConnectionRequest {
        beam_ref,
        steel_ref,
        m_max,
        q: args.shear,
        responsibility_level: args.responsibility.clone(),
    })
}

fn print_report(request: &ConnectionRequest, result: &JointResult) {
    let beam = &result.beam_data;
    println!("═══════════════════════════════════════");
    println!("  BEAM SPLICE RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    match &request.beam_ref {
        BeamRef::Catalog(id) => println!("  Beam:      I{} (h={} b={} s={} t={} mm)", id, beam.h, beam.b, beam.s, beam.t),
        BeamRef::Custom(_) => println!("  Beam:      h={} b={} s={} t={} mm", beam.h, beam.b, beam.s, beam.t),
    }
    println!("  Steel:     Ry = {} MPa", result.steel_data.yield_strength);
    println!("  M_max:     {:.1} kN·m", request.m_max);
    println!("  Q:         {:.1} kN", request.q);
    println!("  Level:     {}", request.responsibility_level.trim());
    println!();
    println!("Bolts: class {}, {} connection", result.bolt_class, result.connection_type);
    println!();
    print_plate("Flange plate (upper)", &result.upper);
    println!();
    print_plate("Web plate (side)", &result.side);
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} bolts per side of the splice {}",
        result.bolts_per_side(),
        status_icon(result.upper.is_valid && result.side.is_valid)
    );
    println!("═══════════════════════════════════════");
}

fn print_plate(title: &str, plate: &PlateDesign) {
    println!("{}:", title);
    println!("  Plate:     {} x {} x {} mm", plate.length, plate.width, plate.thickness);
    println!(
        "  Bolts:     {} x M{} ({} rows x {})",
        plate.count, plate.diameter, plate.rows, plate.bolts_per_row
    );
    println!(
        "  Pitch:     {} mm along, {} mm across",
        plate.vertical_step, plate.horizontal_step
    );
    println!(
        "  Edges:     {} mm along, {} mm across {}",
        plate.edge_distance,
        plate.horizontal_edge_distance,
        status_icon(plate.is_valid)
    );
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_beam_request() {
        let args = Args::parse_from([
            "splice_cli", "--h", "400", "--b", "200", "--s", "8", "--t", "12", "--yield-strength", "240",
            "--moment", "200", "--shear", "100",
        ]);
        let request = build_request(&args).unwrap();
        assert_eq!(request.beam_ref, BeamRef::Custom(BeamSection::new(400.0, 200.0, 8.0, 12.0)));
        assert_eq!(request.steel_ref, SteelRef::Custom(SteelGrade::new(240.0)));
        assert_eq!(request.responsibility_level, "Нормальный");
    }

    #[test]
    fn test_catalog_request_defaults() {
        let args = Args::parse_from(["splice_cli", "--beam", "40", "--moment", "150"]);
        let request = build_request(&args).unwrap();
        assert_eq!(request.beam_ref, BeamRef::Catalog("40".to_string()));
        assert_eq!(request.steel_ref, SteelRef::Catalog("С255".to_string()));
        assert_eq!(request.q, 0.0);
    }

    #[test]
    fn test_missing_moment() {
        let args = Args::parse_from(["splice_cli", "--beam", "40"]);
        assert!(build_request(&args).is_err());
    }

    #[test]
    fn test_partial_inline_beam_rejected_by_parser() {
        assert!(Args::try_parse_from(["splice_cli", "--h", "400", "--moment", "10"]).is_err());
    }

    #[test]
    fn test_core_errors_survive_anyhow() {
        let args = Args::parse_from(["splice_cli", "--beam", "nope", "--moment", "150"]);
        let err = run(&args).unwrap_err();
        let core = err.downcast_ref::<splice_core::SpliceError>().unwrap();
        assert_eq!(core.error_code(), "BEAM_NOT_FOUND");
    }
}
