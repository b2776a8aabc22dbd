//! # 示例应用程序
//!
//! 演示 Lorn DI 的契约绑定与自动注入：
//! `dyn VehiclePart` 绑定到 `Tire`，`dyn Vehicle` 绑定到依赖零件的 `Car`。

use anyhow::Context;
use clap::Parser;
use di_abstractions::{Contract, Dependency, RegistryExt, ServiceRegistry};
use di_impl::{DiRegistry, RegistryConfig};
use di_macros::{Component, Injectable};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn DI 示例应用")]
struct Args {
    /// 注册表配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 序列形式注入同样要求依赖存在
    #[arg(long)]
    strict: bool,
}

/// 车辆零件
pub trait VehiclePart: Send + Sync {
    fn value(&self) -> u32;
}

/// 车辆
pub trait Vehicle: Send + Sync {
    fn part(&self) -> Option<Arc<dyn VehiclePart>>;
}

/// 轮胎
#[derive(Debug, Default, Injectable, Component)]
#[component(implements(dyn VehiclePart))]
pub struct Tire;

impl VehiclePart for Tire {
    fn value(&self) -> u32 {
        1000
    }
}

/// 汽车，通过契约注入零件
#[derive(Debug, Default, Injectable, Component)]
#[component(implements(dyn Vehicle))]
pub struct Car {
    #[inject(contract = dyn VehiclePart)]
    part: Dependency<dyn VehiclePart>,
}

impl Vehicle for Car {
    fn part(&self) -> Option<Arc<dyn VehiclePart>> {
        self.part.get()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志，RUST_LOG 优先于命令行
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动 Lorn DI 示例应用");

    let config = match &args.config {
        Some(path) => RegistryConfig::load(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => RegistryConfig::default(),
    };
    let config = if args.strict {
        config.with_strict_sequence_injection(true)
    } else {
        config
    };
    let registry = DiRegistry::with_config(&config);

    let (value, distinct) = run_vehicle_scenario(&registry)?;
    println!("part value: {}", value);
    println!("distinct parts: {}", distinct);

    registry.reset();
    info!("示例结束");
    Ok(())
}

/// 绑定车辆与零件并解析两次，返回零件值以及两次解析的零件是否不同
fn run_vehicle_scenario(registry: &DiRegistry) -> anyhow::Result<(u32, bool)> {
    registry.bind_class::<_, Tire>(Contract::of::<dyn VehiclePart>())?;
    registry.bind_class::<_, Car>(Contract::of::<dyn Vehicle>())?;

    let first = registry
        .resolve_contract::<dyn Vehicle>()?
        .context("dyn Vehicle 未绑定")?;
    let second = registry
        .resolve_contract::<dyn Vehicle>()?
        .context("dyn Vehicle 未绑定")?;

    let first_part = first.part().context("零件未注入")?;
    let second_part = second.part().context("零件未注入")?;

    Ok((first_part.value(), !Arc::ptr_eq(&first_part, &second_part)))
}
