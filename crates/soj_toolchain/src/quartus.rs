//! Intel Quartus backend.
//!
//! Configure writes a project setup script; build runs it through
//! `quartus_sh -t` and then compiles the project. Quartus writes the SRAM
//! object file under `output_files/`.

use std::path::{Path, PathBuf};

use soj_parts::{BuildPlan, FileType, ToolOptions, ToolchainKind};

use crate::error::ToolchainError;
use crate::launcher::{tcl_path, write_file, Launcher};
use crate::{configured, Project, Toolchain};

const TOOL: &str = "quartus";
const PROGRAM: &str = "quartus_sh";
const OUTPUT_DIR: &str = "output_files";

/// The Quartus backend.
#[derive(Debug)]
pub struct Quartus {
    launcher: Launcher,
    project: Option<Project>,
}

impl Quartus {
    /// Creates the backend.
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            project: None,
        }
    }
}

/// Renders the project setup script.
pub fn project_script(plan: &BuildPlan) -> Result<String, ToolchainError> {
    let ToolOptions::Quartus { device, family } = &plan.tool_options else {
        return Err(ToolchainError::InvalidPlan {
            tool: TOOL,
            reason: "expected Quartus device/family options".to_string(),
        });
    };

    let mut tcl = String::new();
    tcl.push_str(&format!("project_new {} -overwrite\n", plan.name));
    tcl.push_str(&format!("set_global_assignment -name FAMILY \"{family}\"\n"));
    tcl.push_str(&format!("set_global_assignment -name DEVICE {device}\n"));
    tcl.push_str(&format!(
        "set_global_assignment -name TOP_LEVEL_ENTITY {}\n",
        plan.toplevel
    ));
    tcl.push_str(&format!(
        "set_global_assignment -name PROJECT_OUTPUT_DIRECTORY {OUTPUT_DIR}\n"
    ));
    for (name, param) in &plan.parameters {
        tcl.push_str(&format!(
            "set_global_assignment -name VERILOG_MACRO \"{name}={}\"\n",
            param.default
        ));
    }
    for file in &plan.files {
        let path = tcl_path(&file.name);
        let line = match file.file_type {
            FileType::TclSource => format!("source {path}"),
            FileType::VerilogSource => format!("set_global_assignment -name VERILOG_FILE {path}"),
            FileType::Sdc => format!("set_global_assignment -name SDC_FILE {path}"),
            other => {
                return Err(ToolchainError::InvalidPlan {
                    tool: TOOL,
                    reason: format!("unsupported file type {other:?} for {}", file.name.display()),
                })
            }
        };
        tcl.push_str(&line);
        tcl.push('\n');
    }
    tcl.push_str("project_close\n");
    Ok(tcl)
}

impl Toolchain for Quartus {
    fn kind(&self) -> ToolchainKind {
        ToolchainKind::Quartus
    }

    fn configure(&mut self, plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError> {
        let script = project_script(plan)?;
        write_file(&work_root.join(format!("{}.tcl", plan.name)), &script)?;
        self.project = Some(Project::new(plan, work_root));
        Ok(())
    }

    fn build(&mut self) -> Result<(), ToolchainError> {
        let project = configured(&self.project, TOOL)?;
        let program = self.launcher.program(PROGRAM);

        let mut setup = self.launcher.command(program, &project.work_root)?;
        setup.arg("-t").arg(format!("{}.tcl", project.name));
        self.launcher.run(TOOL, "project setup", setup)?;

        let mut compile = self.launcher.command(program, &project.work_root)?;
        compile.args(["--flow", "compile"]).arg(&project.name);
        self.launcher.run(TOOL, "compile", compile)
    }

    fn bitstream(&self, name: &str) -> PathBuf {
        Path::new(OUTPUT_DIR).join(format!("{name}.sof"))
    }
}
