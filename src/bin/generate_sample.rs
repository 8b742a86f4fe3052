use std::path::Path;

use anyhow::{Context, Result};

static JOINTS: [&str; 3] = ["Hip", "Knee", "Ankle"];

/// SplitMix64: tiny, seedable and good enough for sample coordinates.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

/// One capture session: which joints it tracked, whether it recorded
/// confidence scores, and how often a detection drops out.
struct CaptureSession {
    file: &'static str,
    joints: &'static [&'static str],
    with_confidence: bool,
    dropout: f64,
    frames: usize,
}

fn write_session(dir: &Path, session: &CaptureSession, rng: &mut SampleRng) -> Result<()> {
    let path = dir.join(session.file);
    let mut writer =
        csv::Writer::from_path(&path).with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Frame".to_string()];
    for joint in session.joints {
        for axis in ["X", "Y", "Z"] {
            header.push(format!("{joint}_{axis}"));
        }
        if session.with_confidence {
            header.push(format!("{joint}_Confidence"));
        }
    }
    writer.write_record(&header)?;

    for frame in 0..session.frames {
        let mut record = vec![frame.to_string()];
        for _ in session.joints {
            let detected = rng.next_f64() >= session.dropout;
            for _ in 0..3 {
                record.push(if detected {
                    format!("{:.3}", rng.uniform(-500.0, 500.0))
                } else {
                    String::new()
                });
            }
            if session.with_confidence {
                record.push(format!("{:.2}", rng.uniform(0.0, 1.0)));
            }
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Wrote {} frames to {}", session.frames, path.display());
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let dir = Path::new(&dir);
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SampleRng(42);
    let sessions = [
        CaptureSession {
            file: "session_1.csv",
            joints: &JOINTS,
            with_confidence: true,
            dropout: 0.0,
            frames: 20,
        },
        CaptureSession {
            file: "session_2.csv",
            joints: &JOINTS,
            with_confidence: false,
            dropout: 0.1,
            frames: 15,
        },
        CaptureSession {
            file: "session_3.csv",
            joints: &JOINTS[..2],
            with_confidence: true,
            dropout: 0.2,
            frames: 10,
        },
    ];

    for session in &sessions {
        write_session(dir, session, &mut rng)?;
    }
    Ok(())
}
