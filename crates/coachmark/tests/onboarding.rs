#![forbid(unsafe_code)]

//! A host's onboarding flow through the public facade.

use std::cell::Cell;
use std::rc::Rc;

use coachmark::prelude::*;
use coachmark::{FileStorage, Rgba};
use coachmark_harness::{PHONE_SCREEN, TestBackend};

const STYLE_TOML: &str = r##"
corner_radius = 12.0
background_alpha = 0.5
padding = 24.0
text_color = "#FFEEDDFF"

[insets]
top = -6.0
right = -6.0
bottom = -6.0
left = -6.0
"##;

fn onboarding_items() -> Vec<GuideItem> {
    vec![
        GuideItem::view(ViewId(1), "Compose a new message"),
        GuideItem::view(ViewId(2), "Your conversations live here"),
    ]
}

fn backend() -> TestBackend {
    TestBackend::new(Size::new(160.0, 40.0))
        .with_view(ViewId(1), Rect::new(311.0, 44.0, 44.0, 44.0))
        .with_view(ViewId(2), Rect::new(0.0, 400.0, 375.0, 200.0))
}

fn run_onboarding(store: &mut FileStorage, style: &StyleConfig) -> coachmark::Result<bool> {
    let sequence = GuideSequence::new(onboarding_items(), Some("onboarding_v1".into()))?;
    let mut controller = GuideController::new(backend(), sequence, style.clone());
    let mut gate = VisibilityGate::new(store);

    let finished = Rc::new(Cell::new(false));
    let flag = Rc::clone(&finished);
    if !controller.show(&mut gate, PHONE_SCREEN, move || flag.set(true))? {
        return Ok(false);
    }
    while controller.advance()? != AdvanceOutcome::Finished {}
    assert!(finished.get());
    Ok(true)
}

#[test]
fn onboarding_runs_once_per_install() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guides.json");
    let style = StyleConfig::from_toml_str(STYLE_TOML).unwrap();
    assert_eq!(style.text_color, Rgba::rgba(0xFF, 0xEE, 0xDD, 0xFF));

    let mut store = FileStorage::open(&path).unwrap();
    assert!(run_onboarding(&mut store, &style).unwrap());
    assert!(!run_onboarding(&mut store, &style).unwrap());

    let mut reopened = FileStorage::open(&path).unwrap();
    assert!(!run_onboarding(&mut reopened, &style).unwrap());

    reset_guide(&mut reopened, "onboarding_v1").unwrap();
    assert!(run_onboarding(&mut reopened, &style).unwrap());
}

#[test]
fn styled_layout_uses_loaded_values() {
    let style = StyleConfig::from_toml_str(STYLE_TOML).unwrap();
    let mut controller =
        GuideController::with_items(backend(), onboarding_items(), None, style).unwrap();
    controller.show_ungated(PHONE_SCREEN, || {}).unwrap();

    let layout = controller.layout().unwrap();
    assert_eq!(layout.cutout, Rect::new(305.0, 38.0, 56.0, 56.0));
    assert_eq!(layout.corner_radius, 12.0);
    assert_eq!(layout.quadrant, coachmark::Quadrant::UpperRight);
    assert!(layout.text.x >= 24.0);

    let frame = controller.backend().recorded_renderer().last().unwrap();
    assert_eq!(frame.backdrop, Rgba::BLACK.with_alpha(0.5));
}

#[test]
fn errors_convert_into_facade_error() {
    let err: coachmark::Error = GuideSequence::new(Vec::new(), None).unwrap_err().into();
    assert!(matches!(
        err,
        coachmark::Error::Guide(coachmark::GuideError::Sequence(_))
    ));

    let err: coachmark::Error = StyleConfig::from_toml_str("corner_radius = -1.0")
        .unwrap_err()
        .into();
    assert!(matches!(err, coachmark::Error::Style(_)));
}
