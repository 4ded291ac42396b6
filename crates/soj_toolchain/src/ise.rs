//! Xilinx ISE backend.
//!
//! Configure writes an xtclsh script that creates the project and runs the
//! flow up to the programming file; build runs it. ISE leaves `<name>.bit`
//! in the project directory, which is the working directory root.

use std::path::{Path, PathBuf};

use soj_parts::{BuildPlan, FileType, ToolOptions, ToolchainKind};

use crate::error::ToolchainError;
use crate::launcher::{tcl_path, write_file, Launcher};
use crate::{configured, define_words, Project, Toolchain};

const TOOL: &str = "ise";
const PROGRAM: &str = "xtclsh";

/// The ISE backend.
#[derive(Debug)]
pub struct Ise {
    launcher: Launcher,
    project: Option<Project>,
}

impl Ise {
    /// Creates the backend.
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            project: None,
        }
    }
}

/// Renders the xtclsh project and flow script.
pub fn project_script(plan: &BuildPlan) -> Result<String, ToolchainError> {
    let ToolOptions::Ise {
        family,
        device,
        package,
        speed,
    } = &plan.tool_options
    else {
        return Err(ToolchainError::InvalidPlan {
            tool: TOOL,
            reason: "expected ISE family/device/package/speed options".to_string(),
        });
    };

    let mut tcl = String::new();
    tcl.push_str(&format!("project new {}.xise\n", plan.name));
    tcl.push_str(&format!("project set family \"{family}\"\n"));
    tcl.push_str(&format!("project set device {device}\n"));
    tcl.push_str(&format!("project set package {package}\n"));
    tcl.push_str(&format!("project set speed {speed}\n"));
    for file in &plan.files {
        match file.file_type {
            FileType::VerilogSource | FileType::Ucf => {
                tcl.push_str(&format!("xfile add {}\n", tcl_path(&file.name)));
            }
            other => {
                return Err(ToolchainError::InvalidPlan {
                    tool: TOOL,
                    reason: format!("unsupported file type {other:?} for {}", file.name.display()),
                })
            }
        }
    }
    tcl.push_str(&format!(
        "project set \"Verilog Macros\" \"{}\" -process \"Synthesize - XST\"\n",
        define_words(plan).join(" | ")
    ));
    tcl.push_str(&format!("project set top {}\n", plan.toplevel));
    tcl.push_str("process run \"Generate Programming File\"\n");
    tcl.push_str("project close\n");
    Ok(tcl)
}

impl Toolchain for Ise {
    fn kind(&self) -> ToolchainKind {
        ToolchainKind::Ise
    }

    fn configure(&mut self, plan: &BuildPlan, work_root: &Path) -> Result<(), ToolchainError> {
        let script = project_script(plan)?;
        write_file(&work_root.join(format!("{}.tcl", plan.name)), &script)?;
        self.project = Some(Project::new(plan, work_root));
        Ok(())
    }

    fn build(&mut self) -> Result<(), ToolchainError> {
        let project = configured(&self.project, TOOL)?;
        let mut cmd = self
            .launcher
            .command(self.launcher.program(PROGRAM), &project.work_root)?;
        cmd.arg(format!("{}.tcl", project.name));
        self.launcher.run(TOOL, "flow", cmd)
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
    fn project_script_for_spartan6() {
        let tcl = project_script(&plan("xc6slx16ftg256")).unwrap();
        assert!(tcl.starts_with("project new spiOverJtag.xise\n"));
        assert!(tcl.contains("project set family \"Spartan6\"\n"));
        assert!(tcl.contains("project set device xc6slx16\n"));
        assert!(tcl.contains("project set package ftg256\n"));
        assert!(tcl.contains("project set speed -3\n"));
        assert!(tcl.contains("xfile add {/src/constr_xc6s_ftg256.ucf}\n"));
        assert!(tcl.contains("\"Verilog Macros\" \"spartan6=1\""));
        assert!(tcl.ends_with("project close\n"));
    }

    #[test]
    fn source_precedes_constraint() {
        let tcl = project_script(&plan("xc7k325tffg900")).unwrap();
        let wrapper = tcl.find("xilinx_spiOverJtag.v").unwrap();
        let ucf = tcl.find("constr_xc7k_ffg900.ucf").unwrap();
        let core = tcl.find("spiOverJtag_core.v}").unwrap();
        assert!(wrapper < ucf && ucf < core);
        assert!(tcl.contains("project set family \"Kintex7\"\n"));
        assert!(tcl.contains("project set speed -2\n"));
    }

    #[test]
    fn rejects_vivado_plan() {
        let err = project_script(&plan("xc7a35t")).unwrap_err();
        assert!(matches!(err, ToolchainError::InvalidPlan { tool: "ise", .. }));
    }

    #[test]
    fn configure_writes_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut ise = Ise::new(Launcher::default());
        ise.configure(&plan("xc3s500evq100"), dir.path()).unwrap();
        let tcl = std::fs::read_to_string(dir.path().join("spiOverJtag.tcl")).unwrap();
        assert!(tcl.contains("project set device xc3s500e\n"));
    }
}
