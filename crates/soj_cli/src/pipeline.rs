//! The resolve, build and publish sequence behind `soj-build`.

use std::error::Error;
use std::path::Path;

use soj_artifact::{post_process, Published};
use soj_config::{load_config, BuildConfig};
use soj_parts::{assemble_plan, BuildPlan};
use soj_toolchain::{create_toolchain, BuildContext, Toolchain, ToolchainDriver};

use crate::Cli;

/// Runs the command from the current directory.
pub fn run(cli: &Cli) -> Result<i32, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    run_in(cli, &cwd)
}

/// Runs the command with relative configuration paths anchored at `base`.
///
/// The plan is resolved before anything touches the filesystem, so an
/// unsupported identifier leaves no working directory behind.
pub fn run_in(cli: &Cli, base: &Path) -> Result<i32, Box<dyn Error>> {
    let config = load_config(cli.config.as_deref(), base)?;
    let (ctx, plan) = resolve(&cli.part, &config, base)?;

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(0);
    }

    log::info!(
        "building {} ({}, {})",
        plan.part,
        plan.family,
        plan.toolchain
    );
    let toolchain = create_toolchain(plan.toolchain, &config);
    let published = execute(ctx, plan, toolchain)?;
    log::info!("bitstream ready: {}", published.path.display());
    Ok(0)
}

/// Resolves the invocation context and build plan of `part`.
pub fn resolve(
    part: &str,
    config: &BuildConfig,
    base: &Path,
) -> Result<(BuildContext, BuildPlan), Box<dyn Error>> {
    let paths = config.paths.resolve(base);
    let ctx = BuildContext::new(part, &paths);
    let plan = assemble_plan(part, &paths.sources, &ctx.work_dir)?;
    Ok((ctx, plan))
}

/// Drives `toolchain` through the plan and publishes the bitstream.
pub fn execute(
    ctx: BuildContext,
    plan: BuildPlan,
    toolchain: Box<dyn Toolchain>,
) -> Result<Published, Box<dyn Error>> {
    let output_dir = ctx.output_dir.clone();
    let mut driver = ToolchainDriver::create(ctx, toolchain)?;
    driver.configure(plan)?;
    driver.build()?;
    let artifact = driver.artifact()?;
    Ok(post_process(&artifact, &output_dir)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use soj_parts::ToolchainKind;
    use soj_toolchain::ToolchainError;
    use std::path::PathBuf;

    /// Stands in for a vendor tool by writing a fixed bitstream.
    struct FakeTool {
        kind: ToolchainKind,
        bitstream: PathBuf,
        work_root: Option<PathBuf>,
        fail: bool,
        produce: bool,
    }

    impl FakeTool {
        fn boxed(kind: ToolchainKind, bitstream: &str) -> Box<Self> {
            Box::new(Self {
                kind,
                bitstream: PathBuf::from(bitstream),
                work_root: None,
                fail: false,
                produce: true,
            })
        }
    }

    impl Toolchain for FakeTool {
        fn kind(&self) -> ToolchainKind {
            self.kind
        }

        fn configure(&mut self, _plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError> {
            self.work_root = Some(work_root.to_path_buf());
            Ok(())
        }

        fn build(&mut self) -> Result<(), ToolchainError> {
            if self.fail {
                return Err(ToolchainError::InvalidPlan {
                    tool: "fake",
                    reason: "simulated failure".to_string(),
                });
            }
            if let (true, Some(root)) = (self.produce, &self.work_root) {
                let path = root.join(&self.bitstream);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, b"bits").unwrap();
            }
            Ok(())
        }

        fn bitstream(&self, _name: &str) -> PathBuf {
            self.bitstream.clone()
        }
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["soj-build"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn artix_build_publishes_compressed_bitstream() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();
        let (ctx, plan) = resolve("xc7a35tcsg324", &config, dir.path()).unwrap();
        let tool = FakeTool::boxed(ToolchainKind::Vivado, "spiOverJtag.bit");

        let published = execute(ctx, plan, tool).unwrap();
        assert_eq!(
            published.path,
            dir.path().join(".").join("spiOverJtag_xc7a35tcsg324.bit.gz")
        );
        assert!(dir.path().join("tmp_xc7a35tcsg324").is_dir());
        if cfg!(unix) {
            assert_eq!(published.links.len(), 4);
        }
    }

    #[test]
    fn rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();
        for _ in 0..2 {
            let (ctx, plan) = resolve("xc7s25", &config, dir.path()).unwrap();
            let tool = FakeTool::boxed(ToolchainKind::Vivado, "spiOverJtag.bit");
            execute(ctx, plan, tool).unwrap();
        }
        let published = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".bit.gz"))
            .count();
        let expected = if cfg!(unix) { 4 } else { 1 };
        assert_eq!(published, expected);
    }

    #[test]
    fn quartus_build_relocates_sof() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();
        let (ctx, plan) = resolve("10cl025256", &config, dir.path()).unwrap();
        let tool = FakeTool::boxed(ToolchainKind::Quartus, "output_files/spiOverJtag.sof");

        let published = execute(ctx, plan, tool).unwrap();
        assert_eq!(
            published.path,
            dir.path().join("tmp_10cl025256").join("spiOverJtag.sof")
        );
    }

    #[test]
    fn unsupported_part_leaves_no_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_in(&cli(&["zzzz1234"]), dir.path()).unwrap_err();
        assert!(err.to_string().contains("zzzz1234"));
        assert!(!dir.path().join("tmp_zzzz1234").exists());
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_in(&cli(&["--dry-run", "xcku040-ffva1156"]), dir.path()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_build_skips_post_processing() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();
        let (ctx, plan) = resolve("xc7a35t", &config, dir.path()).unwrap();
        let mut tool = FakeTool::boxed(ToolchainKind::Vivado, "spiOverJtag.bit");
        tool.fail = true;

        assert!(execute(ctx, plan, tool).is_err());
        assert!(!dir.path().join("spiOverJtag_xc7a35t.bit.gz").exists());
        assert!(dir.path().join("tmp_xc7a35t").is_dir());
    }

    #[test]
    fn missing_bitstream_fails_after_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = BuildConfig::default();
        let (ctx, plan) = resolve("ep4ce2217", &config, dir.path()).unwrap();
        let mut tool = FakeTool::boxed(ToolchainKind::Quartus, "output_files/spiOverJtag.sof");
        tool.produce = false;

        let err = execute(ctx, plan, tool).unwrap_err();
        assert!(err.to_string().contains("bitstream not found"));
    }

    #[test]
    fn configured_paths_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let config = soj_config::load_config_from_str(
            "[paths]\nsources = \"hdl\"\nwork = \"build\"\noutput = \"dist\"\n",
        )
        .unwrap();
        let (ctx, plan) = resolve("xc7a35t", &config, dir.path()).unwrap();
        assert_eq!(ctx.work_dir, dir.path().join("build").join("tmp_xc7a35t"));
        assert_eq!(ctx.output_dir, dir.path().join("dist"));
        assert_eq!(plan.files[0].name, dir.path().join("hdl").join("xilinx_spiOverJtag.v"));
    }
}
