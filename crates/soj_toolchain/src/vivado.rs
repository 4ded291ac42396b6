//! Xilinx Vivado backend.
//!
//! Configure writes a project script and a run script; build runs Vivado in
//! batch mode on the run script, which sources the project script, runs
//! implementation and writes `<name>.bit` at the working directory root.

use std::path::{Path, PathBuf};

use soj_parts::{BuildPlan, FileType, ToolOptions, ToolchainKind};

use crate::error::ToolchainError;
use crate::launcher::{tcl_path, write_file, Launcher};
use crate::{configured, define_words, Project, Toolchain};

const TOOL: &str = "vivado";

/// The Vivado backend.
#[derive(Debug)]
pub struct Vivado {
    launcher: Launcher,
    project: Option<Project>,
}

impl Vivado {
    /// Creates the backend.
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            project: None,
        }
    }
}

/// Renders the project creation script.
pub fn project_script(plan: &BuildPlan) -> Result<String, ToolchainError> {
    let ToolOptions::Vivado { part } = &plan.tool_options else {
        return Err(ToolchainError::InvalidPlan {
            tool: TOOL,
            reason: "expected a Vivado part option".to_string(),
        });
    };

    let mut tcl = String::new();
    tcl.push_str(&format!("create_project -force {} -part {part}\n", plan.name));
    for file in &plan.files {
        let path = tcl_path(&file.name);
        match file.file_type {
            FileType::VerilogSource => {
                tcl.push_str(&format!("add_files -norecurse {path}\n"));
            }
            FileType::Xdc => {
                tcl.push_str(&format!("read_xdc {path}\n"));
            }
            FileType::TclSource => {
                tcl.push_str(&format!("source {path}\n"));
            }
            other => {
                return Err(ToolchainError::InvalidPlan {
                    tool: TOOL,
                    reason: format!("unsupported file type {other:?} for {}", file.name.display()),
                })
            }
        }
    }
    let defines = define_words(plan);
    if !defines.is_empty() {
        tcl.push_str(&format!(
            "set_property verilog_define {{{}}} [current_fileset]\n",
            defines.join(" ")
        ));
    }
    tcl.push_str(&format!("set_property top {} [current_fileset]\n", plan.toplevel));
    Ok(tcl)
}

/// Renders the implementation run script.
pub fn run_script(name: &str) -> String {
    format!(
        "source {name}.tcl\n\
         launch_runs impl_1 -jobs 4\n\
         wait_on_run impl_1\n\
         if {{[get_property PROGRESS [get_runs impl_1]] != \"100%\"}} {{\n\
         \x20   error \"implementation failed\"\n\
         }}\n\
         open_run impl_1\n\
         write_bitstream -force {name}.bit\n"
    )
}

impl Toolchain for Vivado {
    fn kind(&self) -> ToolchainKind {
        ToolchainKind::Vivado
    }

    fn configure(&mut self, plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError> {
        let script = project_script(plan)?;
        write_file(&work_root.join(format!("{}.tcl", plan.name)), &script)?;
        write_file(
            &work_root.join(format!("{}_run.tcl", plan.name)),
            &run_script(&plan.name),
        )?;
        self.project = Some(Project::new(plan, work_root));
        Ok(())
    }

    fn build(&mut self) -> Result<(), ToolchainError> {
        let project = configured(&self.project, TOOL)?;
        let mut cmd = self
            .launcher
            .command(self.launcher.program(TOOL), &project.work_root)?;
        cmd.args(["-notrace", "-mode", "batch", "-source"])
            .arg(format!("{}_run.tcl", project.name));
        self.launcher.run(TOOL, "implementation", cmd)
    }

    fn bitstream(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{name}.bit"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(part: &str) -> BuildPlan {
        soj_parts::assemble_plan(part, Path::new("/src"), Path::new("/work")).unwrap()
    }

    #[test]
    fn project_script_for_artix() {
        let tcl = project_script(&plan("xc7a35tcsg324")).unwrap();
        assert_eq!(
            tcl,
            "create_project -force spiOverJtag -part xc7a35tcsg324-1\n\
             add_files -norecurse {/src/xilinx_spiOverJtag.v}\n\
             read_xdc {/src/constr_xc7a_csg324.xdc}\n\
             add_files -norecurse {/src/spiOverJtag_core.v}\n\
             set_property verilog_define {artix=1} [current_fileset]\n\
             set_property top spiOverJtag [current_fileset]\n"
        );
    }

    #[test]
    fn project_script_carries_secondary_flash() {
        let tcl = project_script(&plan("xcku060-ffva1156")).unwrap();
        assert!(tcl.contains("-part xcku060-ffva1156-2-e"));
        assert!(tcl.contains("{secondaryflash=1 xilinxultrascale=1}"));
    }

    #[test]
    fn rejects_foreign_options() {
        let err = project_script(&plan("xc6slx9tqg144")).unwrap_err();
        assert!(matches!(err, ToolchainError::InvalidPlan { tool: "vivado", .. }));
    }

    #[test]
    fn run_script_writes_named_bitstream() {
        let tcl = run_script("spiOverJtag");
        assert!(tcl.starts_with("source spiOverJtag.tcl\n"));
        assert!(tcl.contains("    error \"implementation failed\"\n"));
        assert!(tcl.ends_with("write_bitstream -force spiOverJtag.bit\n"));
    }

    #[test]
    fn configure_writes_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let mut vivado = Vivado::new(Launcher::default());
        vivado.configure(&plan("xc7s25"), dir.path()).unwrap();
        assert!(dir.path().join("spiOverJtag.tcl").is_file());
        assert!(dir.path().join("spiOverJtag_run.tcl").is_file());
    }

    #[test]
    fn build_before_configure() {
        let mut vivado = Vivado::new(Launcher::default());
        assert!(vivado.build().is_err());
    }
}
