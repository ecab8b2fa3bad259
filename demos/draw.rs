use bowyer_watson_rs::{
    Algorithm, Canvas, Config, FrameTimer, ShadeOptions, Simulation, Technique,
};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Naive,
    Contiguous,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TechniqueArg {
    Center,
    AverageY,
    Balance,
    Area,
    Random,
}

/// Animate a point set, re-triangulate every frame and save the last one as png
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "100")]
    points: usize,

    #[arg(long, default_value = "120")]
    frames: usize,

    #[arg(long, value_enum, default_value = "contiguous")]
    algorithm: AlgorithmArg,

    #[arg(long, default_value = "0")]
    seed: u64,

    /// seconds per frame
    #[arg(long, default_value = "0.016")]
    dt: f64,

    #[arg(long, value_enum, default_value = "center")]
    technique: TechniqueArg,

    #[arg(long, default_value = "false")]
    invert: bool,

    /// also draw the triangles touching the super triangle
    #[arg(long, default_value = "false")]
    super_triangle: bool,

    #[arg(short, long, default_value = "mesh.png")]
    output: std::path::PathBuf,

    #[arg(long, default_value = "800")]
    width: u32,

    #[arg(long, default_value = "800")]
    height: u32,
}

fn main() -> Result<(), bowyer_watson_rs::Error> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let config = Config::default()
        .with_point_count(args.points)
        .with_seed(args.seed);
    let playground = config.playground;
    let mut simulation = Simulation::new(config)?;
    simulation.set_algorithm(match args.algorithm {
        AlgorithmArg::Naive => Algorithm::BowyerWatson,
        AlgorithmArg::Contiguous => Algorithm::ContiguousBowyerWatson,
    });

    let mut timer = FrameTimer::new();
    for frame in 0..args.frames {
        let stats = simulation.update(args.dt)?;
        timer.tick();
        if frame % 30 == 0 {
            println!(
                "frame {frame}: {} points, {} triangles, {} skipped, {:.1} fps ({})",
                stats.inserted,
                stats.triangles,
                stats.skipped,
                timer.fps(),
                stats.algorithm.name(),
            );
        }
    }

    let options = ShadeOptions {
        technique: match args.technique {
            TechniqueArg::Center => Technique::AverageFromCenter,
            TechniqueArg::AverageY => Technique::AverageY,
            TechniqueArg::Balance => Technique::VerticalBalance,
            TechniqueArg::Area => Technique::Area,
            TechniqueArg::Random => Technique::Random,
        },
        invert: args.invert,
    };

    let mut mesh = simulation.mesh();
    if !args.super_triangle {
        mesh.triangles = mesh.without_super_triangle().copied().collect();
    }

    let illegal = simulation.triangulator().illegal_triangles(1e-9);
    if !illegal.is_empty() {
        println!("{} illegal triangle pairs", illegal.len());
    }

    Canvas::new(args.width, args.height).save_png(
        &mesh,
        options,
        playground,
        &args.output,
    )?;
    println!("{} triangles, shaded by {}", mesh.len(), options.technique.name());
    Ok(())
}
