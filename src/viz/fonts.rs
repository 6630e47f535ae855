//! Font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so one TrueType file is registered
//! as `sans-serif` before the first chart is drawn.

use anyhow::{Result, anyhow};
use log::{debug, warn};
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Common install locations, tried in order.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Path of the font registered so far. Only successes are kept.
static REGISTERED: OnceLock<PathBuf> = OnceLock::new();

/// First existing font: `preferred` if given, else a system location.
pub fn find_font(preferred: Option<&Path>) -> Option<PathBuf> {
    match preferred {
        Some(p) => p.is_file().then(|| p.to_path_buf()),
        None => SYSTEM_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file()),
    }
}

/// Register a font and return its path.
///
/// Once a font is registered it is used for the rest of the process and
/// later `preferred` values are ignored. A failed attempt is not remembered,
/// so a later call may still succeed.
pub fn ensure_font(preferred: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = REGISTERED.get() {
        return Ok(path.clone());
    }
    let path = register(preferred)?;
    // a concurrent caller may have won; its font is the one in use
    Ok(REGISTERED.get_or_init(|| path).clone())
}

fn register(preferred: Option<&Path>) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = match preferred {
        Some(p) => vec![p.to_path_buf()],
        None => SYSTEM_FONTS.iter().map(PathBuf::from).collect(),
    };

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        // plotters keeps a &'static reference for the life of the process
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!("registered font {}", path.display());
                return Ok(path);
            }
            Err(_) => warn!("{} is not a usable TrueType font", path.display()),
        }
    }

    Err(match preferred {
        Some(p) => anyhow!("cannot load font {}", p.display()),
        None => anyhow!("no TrueType font found in system locations; pass one with --font"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_preferred_font_is_not_found() {
        assert_eq!(find_font(Some(Path::new("/no/such/font.ttf"))), None);
    }

    #[test]
    fn failed_registration_does_not_stick() {
        if find_font(None).is_none() {
            return;
        }
        // fails unless another test already registered a font
        let _ = ensure_font(Some(Path::new("/no/such/font.ttf")));
        let used = ensure_font(None).unwrap();
        assert!(used.is_file());
        assert_eq!(REGISTERED.get(), Some(&used));
    }

    #[test]
    fn unreadable_font_is_an_error_before_registration() {
        let dir = std::env::temp_dir().join("climate-charts-not-a-font.ttf");
        std::fs::write(&dir, b"not a font").unwrap();
        // a non-font file never registers, whatever was registered before
        let err = register(Some(&dir)).unwrap_err();
        assert!(err.to_string().contains("cannot load font"));
        std::fs::remove_file(&dir).ok();
    }
}
