use clap::{Args, Parser, Subcommand};
use profile_cad::{
    alignment::{compute_geometry, format_grade, CurveGeometry, CurveInput, CurveKind},
    io::{read_project_json, write_project_json, write_station_table_csv, ProfileProject},
    reporting::{write_report_text, CurveReport, ReportHeader},
    sheet::{write_profile_svg, SheetOptions},
    stationing::{
        build_station_table, chainage_from_station, StationRecord, DEFAULT_STATION_INTERVAL,
    },
    Result,
};

#[cfg(feature = "reporting")]
use profile_cad::reporting::{curve_report_pdf, station_table_excel};

/// Vertical curve design: geometry, station tables, profile sheets and reports.
#[derive(Parser)]
#[command(name = "profile_cad_cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Curve parameters. Defaults match a 120 m crest curve at station 30+12.50.
#[derive(Args, Clone, Debug)]
struct CurveArgs {
    /// Curve kind: crest or sag
    #[arg(long, default_value = "crest")]
    kind: CurveKind,
    /// Elevation of the PIV in meters
    #[arg(long, default_value_t = 200.0, allow_hyphen_values = true)]
    piv_elevation: f64,
    /// Incoming grade magnitude in percent
    #[arg(long, default_value_t = 2.5, allow_hyphen_values = true)]
    grade1: f64,
    /// Outgoing grade magnitude in percent
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    grade2: f64,
    /// Curve length in meters
    #[arg(long, default_value_t = 120.0, allow_hyphen_values = true)]
    length: f64,
    /// Absolute PIV chainage; overrides --piv-station/--piv-offset
    #[arg(long, allow_hyphen_values = true, conflicts_with_all = ["piv_station", "piv_offset"])]
    piv_chainage: Option<f64>,
    /// Station index of the PIV
    #[arg(long, default_value_t = 30)]
    piv_station: u32,
    /// Distance of the PIV past its station in meters
    #[arg(long, default_value_t = 12.5, allow_hyphen_values = true)]
    piv_offset: f64,
    /// Spacing between tabulated stations in meters
    #[arg(long, default_value_t = DEFAULT_STATION_INTERVAL, allow_hyphen_values = true)]
    interval: f64,
}

impl CurveArgs {
    fn to_input(&self) -> Result<CurveInput> {
        let piv_chainage = match self.piv_chainage {
            Some(c) => c,
            None => chainage_from_station(self.piv_station, self.piv_offset, self.interval)?,
        };
        let input = CurveInput {
            kind: self.kind,
            piv_elevation: self.piv_elevation,
            piv_chainage,
            grade1_percent: self.grade1,
            grade2_percent: self.grade2,
            length: self.length,
            station_interval: self.interval,
        };
        input.validate()?;
        Ok(input)
    }
}

#[derive(Args, Clone, Debug)]
struct HeaderArgs {
    /// Project name printed on reports
    #[arg(long, default_value = "")]
    project: String,
    /// User name printed on reports
    #[arg(long, default_value = "")]
    user: String,
}

impl HeaderArgs {
    fn to_header(&self) -> ReportHeader {
        ReportHeader::new(self.project.clone(), self.user.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the geometry of a vertical curve.
    Geometry {
        #[command(flatten)]
        curve: CurveArgs,
    },
    /// Print the station table, or write it as CSV with --output.
    Stations {
        #[command(flatten)]
        curve: CurveArgs,
        #[arg(long)]
        output: Option<String>,
    },
    /// Write the profile sheet as SVG.
    ProfileSvg {
        #[command(flatten)]
        curve: CurveArgs,
        output: String,
    },
    /// Write a text report with the results and station table.
    Report {
        #[command(flatten)]
        curve: CurveArgs,
        #[command(flatten)]
        header: HeaderArgs,
        output: String,
        /// Also write the profile sheet as SVG and name it in the report
        #[arg(long)]
        svg: Option<String>,
        /// Also write the report as PDF
        #[cfg(feature = "reporting")]
        #[arg(long)]
        pdf: Option<String>,
        /// Also write the station table as an Excel workbook
        #[cfg(feature = "reporting")]
        #[arg(long)]
        excel: Option<String>,
    },
    /// Write a project file from the given parameters.
    InitProject {
        #[command(flatten)]
        curve: CurveArgs,
        #[command(flatten)]
        header: HeaderArgs,
        output: String,
    },
    /// Compute everything from a project file into a directory.
    RunProject { input: String, out_dir: String },
}

fn print_geometry(geom: &CurveGeometry) {
    println!("Curve: {}", geom.kind);
    println!(
        "i1 = {}, i2 = {}",
        format_grade(geom.grade1),
        format_grade(geom.grade2)
    );
    println!("g = {:.5}", geom.grade_break);
    println!("e = {:.4} m", geom.mid_offset);
    println!("Z_A (PCV) = {:.3} m", geom.start_elevation);
    println!("Z_I on curve = {:.3} m", geom.piv_on_curve_elevation);
    println!("Z_B (PTV) = {:.3} m", geom.end_elevation);
    match geom.vertex {
        Some(v) => println!("Vertex: x = {:.3} m, Z = {:.3} m", v.position, v.elevation),
        None => println!("Vertex: none"),
    }
}

fn print_station(r: &StationRecord) {
    println!(
        "{},{:.3},{:.3},{:.3},{}",
        r.label, r.chainage, r.offset_from_start, r.elevation, r.role
    );
}

fn compute(input: &CurveInput) -> Result<(CurveGeometry, Vec<StationRecord>)> {
    let geom = compute_geometry(input)?;
    let stations =
        build_station_table(&geom, input.piv_chainage, input.length, input.station_interval)?;
    Ok((geom, stations))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Geometry { curve } => {
            let geom = compute_geometry(&curve.to_input()?)?;
            print_geometry(&geom);
        }
        Commands::Stations { curve, output } => {
            let (_, stations) = compute(&curve.to_input()?)?;
            match output {
                Some(path) => {
                    write_station_table_csv(&path, &stations)?;
                    println!("Wrote {} stations to {}", stations.len(), path);
                }
                None => stations.iter().for_each(print_station),
            }
        }
        Commands::ProfileSvg { curve, output } => {
            let (geom, stations) = compute(&curve.to_input()?)?;
            write_profile_svg(&output, &geom, &stations, &SheetOptions::default())?;
            println!("Wrote {}", output);
        }
        Commands::Report {
            curve,
            header,
            output,
            svg,
            #[cfg(feature = "reporting")]
            pdf,
            #[cfg(feature = "reporting")]
            excel,
        } => {
            let input = curve.to_input()?;
            let (geom, stations) = compute(&input)?;
            let header = header.to_header();
            let mut report =
                CurveReport::new(&header, &input, &geom, &stations).with_date(today());
            if let Some(path) = svg {
                write_profile_svg(&path, &geom, &stations, &SheetOptions::default())?;
                println!("Wrote {}", path);
                report = report.with_drawing(path);
            }
            write_report_text(&output, &report)?;
            println!("Wrote {}", output);
            #[cfg(feature = "reporting")]
            {
                if let Some(path) = pdf {
                    curve_report_pdf(&path, &report)?;
                    println!("Wrote {}", path);
                }
                if let Some(path) = excel {
                    station_table_excel(&path, &report)?;
                    println!("Wrote {}", path);
                }
            }
        }
        Commands::InitProject {
            curve,
            header,
            output,
        } => {
            let project = ProfileProject::new(header.to_header(), curve.to_input()?);
            write_project_json(&output, &project)?;
            println!("Wrote {}", output);
        }
        Commands::RunProject { input, out_dir } => {
            let project = read_project_json(&input)?;
            let (geom, stations) = compute(&project.curve)?;
            std::fs::create_dir_all(&out_dir)?;
            let dir = std::path::Path::new(&out_dir);
            let path_in = |name: &str| dir.join(name).to_string_lossy().into_owned();

            write_station_table_csv(&path_in("stations.csv"), &stations)?;
            write_profile_svg(
                &path_in("profile.svg"),
                &geom,
                &stations,
                &SheetOptions::default(),
            )?;
            let report = CurveReport::new(&project.header, &project.curve, &geom, &stations)
                .with_date(today())
                .with_drawing("profile.svg");
            write_report_text(&path_in("report.txt"), &report)?;
            print_geometry(&geom);
            println!("Wrote results to {}", out_dir);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
