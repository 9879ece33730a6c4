use anyhow::Result;
use std::io;
use std::time::Instant;

use gesture_control::config::Config;
use gesture_control::session::{Callbacks, Session};

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== Gesture Control ({}) ===", env!("GIT_VERSION"));
    println!("カメラ: index {}", config.camera.index);
    println!("モデル: {}", config.detector.model_path);
    println!();
    println!("ジェスチャー:");
    println!("  開いた手      - 回転");
    println!("  人差し指      - カーソル");
    println!("  ピンチ        - クリック");
    println!("  指を閉じた手  - ズーム");
    println!("  拳            - 停止ポーズ");
    println!();
    println!("Enterキーで終了");
    println!();

    // 最後のジェスチャーを覚えて変化したときだけ表示する
    let mut last_gesture = None;
    let mut last_zoom_print = Instant::now();

    let callbacks = Callbacks {
        on_gesture: Some(Box::new(move |gesture| {
            if last_gesture != Some(gesture) {
                println!("ジェスチャー: {}", gesture.name());
                last_gesture = Some(gesture);
            }
        })),
        on_click: Some(Box::new(|| {
            println!("クリック");
        })),
        on_zoom: Some(Box::new(move |factor| {
            // ズーム倍率は毎ティック届くので1秒に1回だけ表示する
            if last_zoom_print.elapsed().as_secs_f32() >= 1.0 {
                println!("ズーム倍率: {:.2}", factor);
                last_zoom_print = Instant::now();
            }
        })),
        on_error: Some(Box::new(|message| {
            eprintln!("エラー: {}", message);
        })),
        ..Default::default()
    };

    let mut session = Session::new(config, callbacks);
    session.activate()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    println!("終了します");
    session.deactivate();

    Ok(())
}
