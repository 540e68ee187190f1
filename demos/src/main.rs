use clap::Parser;
use numgrid::{GridResult, NumericGrid};
use numgrid_demos::{fill_ramp, render_table};
use tracing::info;
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of rows in the sample table.
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Number of columns in the sample table.
    #[arg(long, default_value_t = 2)]
    width: usize,

    /// Cell `(r, c)` of the first table holds `(r * width + c) * step`.
    #[arg(short, long, default_value_t = 2.6)]
    step: f64,

    /// Divisor applied to the float table in the final expression.
    #[arg(short, long, default_value_t = 2.0)]
    divisor: f64,

    /// Factor applied after the division in the final expression.
    #[arg(short, long, default_value_t = 3.2)]
    factor: f64,

    /// Scalar added on the left in the final expression.
    #[arg(short, long, default_value_t = 3)]
    offset: i32,
}

fn main() -> GridResult<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    info!(height = args.height, width = args.width, "allocating table of doubles");

    let mut doubles = NumericGrid::<f64>::new(vec![args.height, args.width])?;
    fill_ramp(&mut doubles, args.step);
    println!("{}", render_table("Table of doubles", &doubles));

    let ints = NumericGrid::<i32>::cast_from(&doubles);
    println!(
        "{}",
        render_table("Table of integers, copied from doubles", &ints)
    );

    doubles.try_mul_assign(&ints)?;
    println!(
        "{}",
        render_table("Table doubles *= table of integers", &doubles)
    );

    let floats: NumericGrid<f32> = doubles.try_add(&ints)?.cast();
    println!(
        "{}",
        render_table("Table of floats = table of doubles + integers", &floats)
    );

    let chained = args.offset + (&floats / args.divisor) * args.factor;
    let expression = format!(
        "{} + (floats / {}) * {}",
        args.offset, args.divisor, args.factor
    );
    println!(
        "{}",
        render_table(&format!("Table of floats = {expression}"), &chained)
    );

    // Widened values print with their full f64 expansion, so 14.52_f32 shows as 14.520000457763672.
    doubles.assign_cast(&chained)?;
    println!(
        "{}",
        render_table(&format!("Table doubles = {expression}, widened"), &doubles)
    );

    info!("done");
    Ok(())
}
