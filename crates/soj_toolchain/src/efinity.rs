//! Efinix Efinity backend.
//!
//! Configure writes an Efinity project file listing the design sources and
//! the generated interface script; build runs the compile flow, which leaves
//! the bitstream under `outflow/`.

use std::path::{Path, PathBuf};

use soj_parts::{BuildPlan, FileType, ToolOptions, ToolchainKind};

use crate::error::ToolchainError;
use crate::launcher::{write_file, Launcher};
use crate::{configured, Project, Toolchain};

const TOOL: &str = "efinity";
const PROGRAM: &str = "efx_run.py";
const OUTPUT_DIR: &str = "outflow";

/// The Efinity backend.
#[derive(Debug)]
pub struct Efinity {
    launcher: Launcher,
    project: Option<Project>,
}

impl Efinity {
    /// Creates the backend.
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            project: None,
        }
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders the Efinity project file.
pub fn project_xml(plan: &BuildPlan, work_root: &Path) -> Result<String, ToolchainError> {
    let ToolOptions::Efinity {
        part,
        family,
        timing,
    } = &plan.tool_options
    else {
        return Err(ToolchainError::InvalidPlan {
            tool: TOOL,
            reason: "expected Efinity part/family/timing options".to_string(),
        });
    };

    let mut design = String::new();
    let mut interface = String::new();
    for file in &plan.files {
        let name = escape(&file.name.display().to_string());
        match file.file_type {
            FileType::VerilogSource => {
                design.push_str(&format!(
                    "    <efx:design_file name=\"{name}\" version=\"default\" library=\"default\"/>\n"
                ));
            }
            FileType::Isf => {
                interface.push_str(&format!("    <efx:isf_file name=\"{name}\"/>\n"));
            }
            other => {
                return Err(ToolchainError::InvalidPlan {
                    tool: TOOL,
                    reason: format!("unsupported file type {other:?} for {}", file.name.display()),
                })
            }
        }
    }

    let location = escape(&work_root.display().to_string());
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <efx:project name=\"{name}\" location=\"{location}\" \
         xmlns:efx=\"http://www.efinixinc.com/enf_proj\">\n\
         \x20 <efx:device_info>\n\
         \x20   <efx:family name=\"{family}\"/>\n\
         \x20   <efx:device name=\"{part}\"/>\n\
         \x20   <efx:timing_model name=\"{timing}\"/>\n\
         \x20 </efx:device_info>\n\
         \x20 <efx:design_info def_veri_version=\"verilog_2k\">\n\
         \x20   <efx:top_module name=\"{top}\"/>\n\
         {design}\
         \x20 </efx:design_info>\n\
         \x20 <efx:constraint_info>\n\
         {interface}\
         \x20 </efx:constraint_info>\n\
         </efx:project>\n",
        name = plan.name,
        top = plan.toplevel,
    ))
}

impl Toolchain for Efinity {
    fn kind(&self) -> ToolchainKind {
        ToolchainKind::Efinity
    }

    fn configure(&mut self, plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError> {
        let xml = project_xml(plan, work_root)?;
        write_file(&work_root.join(format!("{}.xml", plan.name)), &xml)?;
        self.project = Some(Project::new(plan, work_root));
        Ok(())
    }

    fn build(&mut self) -> Result<(), ToolchainError> {
        let project = configured(&self.project, TOOL)?;
        let mut cmd = self
            .launcher
            .command(self.launcher.program(PROGRAM), &project.work_root)?;
        cmd.arg(format!("{}.xml", project.name))
            .args(["--flow", "compile"]);
        self.launcher.run(TOOL, "compile", cmd)
    }

    fn bitstream(&self, name: &str) -> PathBuf {
        Path::new(OUTPUT_DIR).join(format!("{name}.bit"))
    }
}
