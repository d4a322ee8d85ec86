//! Human-readable description of a resolved run

use std::fmt;
use std::path::PathBuf;

use crate::config::{Geometry, OutputNaming, ResizeJob};
use crate::intake::Switches;
use crate::processing::supported_input_formats;

/// Everything a run will do, printed by `--summary`
pub struct JobSummary<'a> {
    pub job: &'a ResizeJob,
    pub naming: &'a OutputNaming,
    pub switches: &'a Switches,
    pub paths: &'a [PathBuf],
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

impl fmt::Display for JobSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let job = self.job;
        let switches = self.switches;

        writeln!(f, "Summary:")?;
        writeln!(f, "\tKeep original image     : {}", yes_no(switches.keep))?;
        writeln!(f, "\tShow progress bar       : {}", yes_no(switches.show_progress()))?;
        writeln!(f, "\tRecursive               : {}", yes_no(switches.recursive))?;
        writeln!(f, "\tVerbose                 : {}", yes_no(switches.verbose))?;
        writeln!(f, "\tDelete on failure       : {}", yes_no(switches.delete_fails))?;
        writeln!(f, "\tDry run                 : {}", yes_no(switches.dry_run))?;
        writeln!(f, "\tDownscale interpolation : {}", job.down_interpolation())?;
        writeln!(f, "\tUpscale interpolation   : {}", job.up_interpolation())?;

        match job.geometry() {
            Geometry::Scale { factor } => {
                writeln!(f, "\tResize method           : Scale")?;
                writeln!(f, "\tScale factor            : {}", factor)?;
            }
            Geometry::Explicit { width, height } => {
                writeln!(f, "\tResize method           : Fixed Height/Width")?;
                writeln!(f, "\tHeight                  : {}", height)?;
                writeln!(f, "\tWidth                   : {}", width)?;
            }
        }

        writeln!(f, "\tJPEG quality            : {}", job.jpeg_quality())?;
        writeln!(f, "\tOutput format           : {}", job.output_format())?;
        writeln!(
            f,
            "\tTarget extensions       : {}",
            supported_input_formats().join(" ")
        )?;
        if self.naming.keep {
            writeln!(f, "\tSuffix                  : {}", self.naming.suffix)?;
        }
        writeln!(f, "\tThreads                 : {}", job.threads())?;

        writeln!(f, "Input paths :")?;
        for path in self.paths {
            writeln!(f, "\t- {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, RawOptions};

    #[test]
    fn test_scale_summary() {
        let raw = RawOptions::from_pairs([("scale", "0.5"), ("threads", "3")]).unwrap();
        let job = resolve(&raw).unwrap();
        let naming = OutputNaming {
            keep: false,
            suffix: "_resized".to_string(),
        };
        let switches = Switches {
            recursive: true,
            ..Switches::default()
        };
        let paths = vec![PathBuf::from("photos")];

        let text = JobSummary {
            job: &job,
            naming: &naming,
            switches: &switches,
            paths: &paths,
        }
        .to_string();

        assert!(text.starts_with("Summary:\n"));
        assert!(text.contains("\tRecursive               : true\n"));
        assert!(text.contains("\tScale factor            : 0.5\n"));
        assert!(text.contains("\tDownscale interpolation : area\n"));
        assert!(text.contains("\tThreads                 : 3\n"));
        assert!(text.contains("\t- photos\n"));
        assert!(!text.contains("Suffix"));
    }

    #[test]
    fn test_fixed_size_summary_with_suffix() {
        let raw = RawOptions::from_pairs([("width", "640"), ("height", "480")]).unwrap();
        let job = resolve(&raw).unwrap();
        let naming = OutputNaming {
            keep: true,
            suffix: "_small".to_string(),
        };
        let switches = Switches {
            keep: true,
            ..Switches::default()
        };

        let text = JobSummary {
            job: &job,
            naming: &naming,
            switches: &switches,
            paths: &[],
        }
        .to_string();

        assert!(text.contains("Fixed Height/Width"));
        assert!(text.contains("\tHeight                  : 480\n"));
        assert!(text.contains("\tWidth                   : 640\n"));
        assert!(text.contains("\tSuffix                  : _small\n"));
        assert!(text.contains("\tOutput format           : jpg\n"));
    }
}
