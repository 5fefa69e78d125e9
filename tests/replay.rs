//! End-to-end runs through the replay path: the library API and the
//! `etchsketch --replay` binary.

use etchsketch::color::Rgb;
use etchsketch::controller::Controller;
use etchsketch::grid::CellId;
use etchsketch::replay::{replay_into, ReplaySource, Snapshot};
use etchsketch::surface::headless::HeadlessSurface;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::process::{Command, Stdio};

const SCRIPT: &str = r#"
{"event":"resize","size":32}
{"event":"select_default_color"}
{"event":"pointer_press","row":5,"col":5}
{"event":"pointer_release"}
"#;

#[test]
fn resize_draw_clear_through_replay() {
    let mut controller = Controller::new(HeadlessSurface::new(), StdRng::seed_from_u64(3));
    controller.start().unwrap();

    let mut source = ReplaySource::new(SCRIPT.as_bytes());
    assert_eq!(replay_into(&mut source, &mut controller).unwrap(), 4);

    let snap = Snapshot::capture(&controller);
    assert_eq!(snap.size, 32);
    assert_eq!(snap.cells.len(), 1024);
    for (i, cell) in snap.cells.iter().enumerate() {
        if i == CellId::new(5, 5).index(32) {
            assert_eq!(*cell, Some(Rgb::BLACK));
        } else {
            assert_eq!(*cell, None);
        }
    }
    assert_eq!(controller.surface().size_label(), "32 x 32");

    let mut clear = ReplaySource::new(r#"{"event":"clear"}"#.as_bytes());
    replay_into(&mut clear, &mut controller).unwrap();
    assert_eq!(controller.grid().cell_count(), 1024);
    assert_eq!(controller.surface().colored_count(), 0);
}

#[test]
fn rejected_resizes_keep_the_drawing() {
    let mut controller = Controller::new(HeadlessSurface::new(), StdRng::seed_from_u64(3));
    controller.start().unwrap();
    let script = concat!(
        r#"{"event":"pointer_press","row":0,"col":0}"#, "\n",
        r#"{"event":"resize","size":0}"#, "\n",
        r#"{"event":"resize","size":101}"#, "\n",
        r#"{"event":"resize","size":-5}"#, "\n",
    );
    replay_into(&mut ReplaySource::new(script.as_bytes()), &mut controller).unwrap();
    assert_eq!(controller.state().current_size.get(), 16);
    assert_eq!(controller.grid().cell_count(), 256);
    assert_eq!(controller.grid().color_at(CellId::new(0, 0)), Some(Rgb::BLACK));
}

#[test]
fn touch_drag_on_headless_area() {
    // 640px area, 16 cells: 40px per cell.
    let mut controller = Controller::new(HeadlessSurface::new(), StdRng::seed_from_u64(3));
    controller.start().unwrap();
    let script = concat!(
        r#"{"event":"touch_start","x":10,"y":10}"#, "\n",
        r#"{"event":"touch_move","x":50,"y":10}"#, "\n",
        r#"{"event":"touch_move","x":90,"y":90}"#, "\n",
        r#"{"event":"touch_end"}"#, "\n",
        r#"{"event":"touch_move","x":130,"y":130}"#, "\n",
    );
    replay_into(&mut ReplaySource::new(script.as_bytes()), &mut controller).unwrap();
    let grid = controller.grid();
    assert_eq!(grid.color_at(CellId::new(0, 0)), Some(Rgb::BLACK));
    assert_eq!(grid.color_at(CellId::new(0, 1)), Some(Rgb::BLACK));
    assert_eq!(grid.color_at(CellId::new(2, 2)), Some(Rgb::BLACK));
    assert_eq!(grid.colored_count(), 3);
}

#[test]
fn binary_prints_snapshot() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_etchsketch"))
        .args(["--replay", "-", "--config", "/nonexistent/etchsketch.json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn etchsketch");
    {
        let mut stdin = child.stdin.take().expect("stdin");
        writeln!(stdin, r#"{{"event":"resize","size":2}}"#).unwrap();
        writeln!(stdin, "garbage").unwrap();
        writeln!(stdin, r#"{{"event":"pointer_press","row":1,"col":0}}"#).unwrap();
    }
    let output = child.wait_with_output().expect("wait");
    assert!(output.status.success());

    let snap: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snap["size"], 2);
    assert_eq!(snap["current_color"], "rgb(0, 0, 0)");
    assert_eq!(
        snap["cells"],
        serde_json::json!([null, null, "rgb(0, 0, 0)", null])
    );
}
