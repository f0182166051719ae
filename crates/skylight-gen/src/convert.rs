//! Photo conversion via ImageMagick (`convert`) or GraphicsMagick
//! (`gm convert`).

use std::path::Path;
use std::process::{Command, Stdio};

use log::info;

use skylight_types::error::{Result, SkylightError};

use crate::config::ConversionConfig;

/// Default thumbnail geometry. The trailing `>` only shrinks.
pub const THUMB_SIZE: &str = "128x128>";
/// Default full-image geometry.
pub const IMAGE_SIZE: &str = "800x600>";

/// Argument list for one photo conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionArgs {
    pub size: String,
    pub quality: String,
    pub unsharp: String,
    pub params: Vec<String>,
}

impl ConversionArgs {
    pub fn new(size: &str) -> Self {
        Self {
            size: size.to_string(),
            quality: "90".to_string(),
            unsharp: "0.1x0.1+2.0+0".to_string(),
            params: Vec::new(),
        }
    }

    /// Build the argument list from configuration, falling back to
    /// `default_size` when no size is configured for this photo kind.
    pub fn from_config(config: &ConversionConfig, default_size: &str) -> Self {
        Self {
            size: config
                .size
                .clone()
                .unwrap_or_else(|| default_size.to_string()),
            quality: config.quality.clone(),
            unsharp: config.unsharp.clone(),
            params: config
                .params
                .split_whitespace()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// The command line arguments, in the order the conversion tool
    /// expects them. Empty `quality` or `unsharp` drop their flag.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["-resize".to_string(), self.size.clone()];
        if !self.quality.is_empty() {
            args.push("-quality".to_string());
            args.push(self.quality.clone());
        }
        args.extend(self.params.iter().cloned());
        if !self.unsharp.is_empty() {
            args.push("-unsharp".to_string());
            args.push(self.unsharp.clone());
        }
        args
    }
}

/// Runs the configured conversion tool.
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    graphicsmagick: bool,
}

impl Converter {
    pub fn new(graphicsmagick: bool) -> Self {
        Self { graphicsmagick }
    }

    fn tool_name(&self) -> &'static str {
        if self.graphicsmagick { "gm convert" } else { "convert" }
    }

    /// Convert `input` into `output` with the given arguments.
    pub fn convert(&self, input: &Path, output: &Path, args: &ConversionArgs) -> Result<()> {
        let mut command = if self.graphicsmagick {
            let mut command = Command::new("gm");
            command.arg("convert");
            command
        } else {
            Command::new("convert")
        };
        let status = command
            .arg(input)
            .args(args.to_args())
            .arg(output)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if !status.success() {
            return Err(SkylightError::Tool {
                name: self.tool_name().to_string(),
                status: status.code().unwrap_or(-1),
            });
        }
        info!("converted {} -> {}", input.display(), output.display());
        Ok(())
    }

    /// Probe for the conversion tool, naming the software when missing.
    pub fn check_available(&self) -> Result<()> {
        if self.graphicsmagick {
            check_command("gm", "GraphicsMagick (gm command)")
        } else {
            check_command("convert", "ImageMagick (convert command)")
        }
    }
}

/// Probe `cmd -help` to confirm the command can run at all.
pub fn check_command(cmd: &str, software: &str) -> Result<()> {
    let status = Command::new(cmd)
        .arg("-help")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(SkylightError::MissingTool {
            name: software.to_string(),
            reason: format!("`{cmd} -help` exited with {status}"),
        }),
        Err(e) => Err(SkylightError::MissingTool {
            name: software.to_string(),
            reason: e.to_string(),
        }),
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
