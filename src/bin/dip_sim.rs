//! 槽位排队仿真
//!
//! 从场景 JSON 或命令行参数构建场景，运行到所有人离场，打印汇总。

use clap::{Parser, ValueEnum};
use dipsim::engine::{
    AdmissionPolicy, DEFAULT_BATCH_CAP, DEFAULT_QUEUE_CAPACITY, EngineObserver, NoopObserver,
    TracingObserver,
};
use dipsim::sim::{ArrivalSpec, Backpressure, DEFAULT_SEED, ScenarioSpec};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dip-sim", about = "槽位排队仿真：N 个槽位、固定服务时长、批量分配")]
struct Args {
    /// 场景 JSON；命令行参数会覆盖其中的同名字段
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// 槽位数量
    #[arg(long)]
    slots: Option<usize>,

    /// 每人占用槽位的时长
    #[arg(long)]
    service_time: Option<u64>,

    /// 到达人数（随机错开到达）
    #[arg(long)]
    people: Option<u64>,

    /// 相邻到达的最大间隔
    #[arg(long)]
    max_gap: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    batch_cap: Option<usize>,

    #[arg(long)]
    queue_capacity: Option<usize>,

    /// 有空闲槽位就分配，而不是凑齐一批
    #[arg(long)]
    greedy: bool,

    /// 等待区已满时的处理方式
    #[arg(long, value_enum)]
    backpressure: Option<BackpressureArg>,

    /// 以 tracing 事件输出每次状态转换
    #[arg(long)]
    trace: bool,

    /// 关闭日志
    #[arg(long)]
    quiet: bool,
}

fn default_scenario() -> ScenarioSpec {
    ScenarioSpec {
        slots: 10,
        service_time: 5,
        batch_cap: Some(DEFAULT_BATCH_CAP),
        queue_capacity: Some(DEFAULT_QUEUE_CAPACITY),
        policy: None,
        backpressure: None,
        arrivals: ArrivalSpec::Staggered {
            count: 1_000,
            max_gap: 2,
            seed: Some(DEFAULT_SEED),
        },
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackpressureArg {
    Fail,
    Drop,
    Stall,
}

impl From<BackpressureArg> for Backpressure {
    fn from(arg: BackpressureArg) -> Self {
        match arg {
            BackpressureArg::Fail => Backpressure::Fail,
            BackpressureArg::Drop => Backpressure::Drop,
            BackpressureArg::Stall => Backpressure::Stall,
        }
    }
}

fn apply_overrides(spec: &mut ScenarioSpec, args: &Args) {
    if let Some(v) = args.slots {
        spec.slots = v;
    }
    if let Some(v) = args.service_time {
        spec.service_time = v;
    }
    if let Some(v) = args.batch_cap {
        spec.batch_cap = Some(v);
    }
    if let Some(v) = args.queue_capacity {
        spec.queue_capacity = Some(v);
    }
    if args.greedy {
        spec.policy = Some(AdmissionPolicy::Greedy);
    }
    if let Some(bp) = args.backpressure {
        spec.backpressure = Some(bp.into());
    }
    if args.people.is_some() || args.max_gap.is_some() || args.seed.is_some() {
        let (count, max_gap, seed) = match &spec.arrivals {
            ArrivalSpec::Staggered {
                count,
                max_gap,
                seed,
            } => (*count, *max_gap, *seed),
            ArrivalSpec::Fixed { times } => (times.len() as u64, 2, None),
        };
        spec.arrivals = ArrivalSpec::Staggered {
            count: args.people.unwrap_or(count),
            max_gap: args.max_gap.unwrap_or(max_gap),
            seed: args.seed.or(seed),
        };
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.quiet {
            tracing_subscriber::EnvFilter::new("off")
        } else {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        })
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut spec = match &args.scenario {
        Some(path) => ScenarioSpec::load(path)?,
        None => default_scenario(),
    };
    apply_overrides(&mut spec, args);

    let observer: Box<dyn EngineObserver> = if args.trace {
        Box::new(TracingObserver)
    } else {
        Box::new(NoopObserver)
    };
    let report = spec.run(observer)?;

    let total_wait: u64 = report
        .departures
        .iter()
        .filter_map(|p| p.wait_time())
        .map(|t| t.0)
        .sum();
    println!(
        "summary final_time={} arrived={} rejected={} departed={} peak_waiting={} total_wait={}",
        report.final_time.0,
        report.stats.arrived,
        report.stats.rejected,
        report.stats.departed,
        report.stats.peak_waiting,
        total_wait,
    );
    Ok(())
}
