/// Replays a recorded skeleton stream and prints the detected postures
/// and gestures of every player.

extern crate depthgesture;

extern crate clap;
#[macro_use]
extern crate log;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
extern crate serde_json;

use depthgesture::frame::read_depth_frame;
use depthgesture::gesture::GestureTracker;
use depthgesture::players::{Player, PlayerTracker, SceneExit};
use depthgesture::posture::{hand_clock_angle, PostureDetector};
use depthgesture::types::MaskOps;
use depthgesture::{Config, Side, SkeletonFrame};

use clap::{App, Arg};

use std::fs::File;
use std::io::BufReader;

error_chain! {
    links {
        Gesture(depthgesture::errors::Error, depthgesture::errors::ErrorKind);
    }
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }
}

pub fn main() {
    use std::process::exit;
    if let Err(e) = main_() {
        eprintln!("Error: {}", e);
        for e in e.iter().skip(1) {
            eprintln!("  caused by: {}", e);
        }
        exit(-1);
    }
}

fn main_() -> Result<()> {
    env_logger::init();
    let args = App::new("skeleton_replay")
        .arg(Arg::with_name("recording")
            .required(true)
            .takes_value(true)
            .help("JSON file with a list of skeleton frames"))
        .arg(Arg::with_name("config")
            .short("c")
            .long("config")
            .takes_value(true)
            .help("JSON file with the detection thresholds"))
        .arg(Arg::with_name("depth")
            .short("d")
            .long("depth")
            .takes_value(true)
            .help("Raw 640x480 depth frame to summarize"))
        .get_matches();

    let config = match args.value_of("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(path) = args.value_of("depth") {
        let depth = read_depth_frame(BufReader::new(File::open(path)?), 640, 480)?;
        let mask = depth.player_mask()?;
        println!("Depth frame: {} player pixels", mask.mask_size());
    }

    let path = args.value_of("recording").unwrap_or_default();
    let frames: Vec<SkeletonFrame> = serde_json::from_reader(BufReader::new(File::open(path)
        .chain_err(|| format!("Cannot open recording {}", path))?))?;
    info!("Replaying {} frames", frames.len());

    let postures = PostureDetector::new(config.posture.clone());
    let mut gestures = GestureTracker::new(&config.gesture);
    let mut players = PlayerTracker::new();

    for frame in &frames {
        players.update(frame);
        match players.left_scene() {
            SceneExit::None => {}
            exit => println!("{:>8} ms  left: {:?}", frame.timestamp_ms, exit),
        }
        for &player in &[Player::One, Player::Two] {
            let skeleton = match players.player(player) {
                Some(s) => s,
                None => continue,
            };
            let active: Vec<_> = postures.active_postures(skeleton, &frame.floor_clip_plane)
                .iter()
                .map(|p| p.name())
                .collect();
            let clock = hand_clock_angle(skeleton, Side::Right)
                .map_or("-".to_string(), |a| format!("{:.0}", a));
            println!("{:>8} ms  {:?} ({}): right hand at {} deg, {}",
                     frame.timestamp_ms,
                     player,
                     skeleton.tracking_id,
                     clock,
                     active.join(" "));
        }
        for event in gestures.update(frame) {
            println!("{:>8} ms  {:?} by {}", frame.timestamp_ms, event.gesture, event.tracking_id);
        }
    }
    Ok(())
}
