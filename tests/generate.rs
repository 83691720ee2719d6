//! End-to-end runs of whole asset groups into a scratch directory.

use std::path::{Path, PathBuf};

use blossom_assets::backgrounds::{self, Act};
use blossom_assets::cli::AssetGroup;
use blossom_assets::params::GeneratorConfig;
use blossom_assets::{audio, generate};

fn scratch(name: &str) -> GeneratorConfig {
    let out_root = std::env::temp_dir().join(format!(
        "blossom-assets-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&out_root);
    GeneratorConfig {
        out_root,
        seed: 42,
    }
}

fn png_size(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}

fn count_files(dir: &Path, ext: &str) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|x| x == ext))
        .count()
}

#[test]
fn test_sprite_groups_write_expected_files() {
    let config = scratch("sprites");
    generate(
        &config,
        &[
            AssetGroup::Characters,
            AssetGroup::Ui,
            AssetGroup::Props,
            AssetGroup::Vfx,
        ],
    )
    .unwrap();
    let layout = config.layout();

    let characters = layout.characters_dir();
    assert_eq!(count_files(&characters, "png"), 12);
    assert_eq!(
        png_size(&characters.join("tejimola_child_spritesheet.png")),
        (512, 256)
    );
    assert_eq!(png_size(&characters.join("dom_portrait.png")), (256, 256));

    let menu = layout.menu_dir();
    assert_eq!(count_files(&menu, "png"), 1 + 9 * 2);
    assert_eq!(png_size(&menu.join("menu_background.png")), (1920, 1080));
    assert_eq!(png_size(&menu.join("btn_back_highlight.png")), (300, 60));
    assert_eq!(
        png_size(&layout.dialogue_dir().join("dialogue_box.png")),
        (1200, 250)
    );
    assert_eq!(png_size(&layout.hud_dir().join("bar_fill.png")), (292, 22));

    let props = layout.props_dir();
    assert_eq!(count_files(&props, "png"), 10);
    assert_eq!(png_size(&props.join("gamosa.png")), (128, 64));

    let vfx = layout.vfx_dir();
    assert_eq!(count_files(&vfx, "png"), 8);
    assert_eq!(png_size(&vfx.join("beat_perfect.png")), (64, 64));

    std::fs::remove_dir_all(&config.out_root).unwrap();
}

#[test]
fn test_background_act_layers() {
    let config = scratch("backgrounds");
    backgrounds::generate_act(Act::Act4, &config).unwrap();

    let dir = config.layout().background_dir("Act4");
    for name in [
        "layer4_sky",
        "layer3_background",
        "layer2_midground",
        "layer1_foreground",
        "preview_composite",
    ] {
        assert_eq!(png_size(&dir.join(format!("{name}.png"))), (1920, 1080));
    }

    std::fs::remove_dir_all(&config.out_root).unwrap();
}

#[test]
fn test_sfx_are_mirrored_to_resources() {
    let config = scratch("sfx");
    let written = audio::generate_sfx(&config).unwrap();

    let [primary, mirror]: [PathBuf; 2] = config.layout().sfx_dirs();
    assert_eq!(count_files(&primary, "wav"), written);
    assert_eq!(count_files(&mirror, "wav"), written);

    let a = std::fs::read(primary.join("heartbeat.wav")).unwrap();
    let b = std::fs::read(mirror.join("heartbeat.wav")).unwrap();
    assert_eq!(a, b);

    let reader = hound::WavReader::open(primary.join("ui_click.wav")).unwrap();
    assert_eq!(reader.spec().sample_rate, 44_100);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 2205);

    std::fs::remove_dir_all(&config.out_root).unwrap();
}

#[test]
fn test_same_seed_same_sfx() {
    let first = scratch("seed-a");
    let second = scratch("seed-b");
    audio::generate_sfx(&first).unwrap();
    audio::generate_sfx(&second).unwrap();

    let name = "footstep_wood_0.wav";
    let a = std::fs::read(first.layout().sfx_dirs()[0].join(name)).unwrap();
    let b = std::fs::read(second.layout().sfx_dirs()[0].join(name)).unwrap();
    assert_eq!(a, b);

    std::fs::remove_dir_all(&first.out_root).unwrap();
    std::fs::remove_dir_all(&second.out_root).unwrap();
}

#[test]
fn test_music_tracks_mirrored_with_shared_themes() {
    let config = scratch("music");
    let written = audio::generate_music(&config).unwrap();
    assert_eq!(written, 10);

    let [primary, mirror]: [PathBuf; 2] = config.layout().music_dirs();
    assert_eq!(count_files(&primary, "wav"), 10);
    assert_eq!(count_files(&mirror, "wav"), 10);

    let read = |name: &str| std::fs::read(primary.join(format!("{name}.wav"))).unwrap();
    let descent = read("act2_descent");
    assert_eq!(read("act1_funeral"), descent);
    assert_eq!(read("act2_burial"), descent);
    assert_eq!(read("act3_arrival"), read("act3_dual"));
    assert_ne!(read("act1_happy"), descent);
    assert_eq!(
        std::fs::read(mirror.join("act4_boss.wav")).unwrap(),
        read("act4_boss")
    );

    let seconds = |name: &str| {
        let reader = hound::WavReader::open(primary.join(format!("{name}.wav"))).unwrap();
        reader.len() / reader.spec().sample_rate
    };
    assert_eq!(seconds("menu"), 20);
    assert_eq!(seconds("act2_dheki"), 60);
    for name in [
        "act1_happy",
        "act1_funeral",
        "act2_descent",
        "act2_burial",
        "act3_arrival",
        "act3_dual",
        "act4_boss",
        "epilogue",
    ] {
        assert_eq!(seconds(name), 30, "{name}");
    }

    std::fs::remove_dir_all(&config.out_root).unwrap();
}
