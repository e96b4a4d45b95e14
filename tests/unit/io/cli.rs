//! Tests for command-line parsing and end-to-end sessions

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use trufflify::TrufflifyError;
    use trufflify::algorithm::driver::{FrameSource, TransportAnimation};
    use trufflify::algorithm::transport::ParticleTransport;
    use trufflify::io::cli::{Cli, Mode, Session};
    use trufflify::io::configuration::{
        BACKGROUND, DEFAULT_FRAMES, DEFAULT_TARGET_PATH, ITERATIONS_PER_TICK, MATCH_SAMPLES,
        PARTICLE_BUDGET, VIEWPORT_SIZE, frame_delay_ms,
    };
    use trufflify::io::image::load_pixel_grid;
    use trufflify::io::visualization::rasterize_points;
    use trufflify::spatial::Viewport;

    fn write_image(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(path)
            .expect("write test image");
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("trufflify").chain(args.iter().copied()))
    }

    // Tests parsing with only the required input argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = parse(&["-f", "cat.png"]);

        assert_eq!(cli.input, PathBuf::from("cat.png"));
        assert_eq!(cli.target, PathBuf::from(DEFAULT_TARGET_PATH));
        assert_eq!(cli.mode, Mode::Evolve);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.frames, DEFAULT_FRAMES);
        assert_eq!(cli.iterations_per_frame, ITERATIONS_PER_TICK);
        assert_eq!(cli.budget, PARTICLE_BUDGET);
        assert_eq!(cli.samples, MATCH_SAMPLES);
        assert_eq!(cli.viewport, VIEWPORT_SIZE);
        assert_eq!(cli.restart_at, None);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
    }

    // Tests parsing with every argument supplied
    // Verified by renaming a long flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = parse(&[
            "--file",
            "in/cat.png",
            "--target",
            "sauce.png",
            "--mode",
            "particles",
            "--seed",
            "99",
            "--frames",
            "12",
            "--iterations-per-frame",
            "50",
            "--budget",
            "400",
            "--samples",
            "7",
            "--viewport",
            "128",
            "--restart-at",
            "6",
            "--output",
            "out/anim.gif",
            "--quiet",
        ]);

        assert_eq!(cli.mode, Mode::Particles);
        assert_eq!(cli.seed, Some(99));
        assert_eq!(cli.frames, 12);
        assert_eq!(cli.restart_at, Some(6));
        assert!(!cli.should_show_progress());

        let mutation = cli.mutation_config();
        assert_eq!(mutation.iterations_per_tick, 50);

        let transport = cli.transport_config();
        assert_eq!(transport.particle_budget, 400);
        assert_eq!(transport.match_samples, 7);

        assert_eq!(cli.animation_path(), PathBuf::from("out/anim.gif"));
        assert_eq!(cli.result_path(), PathBuf::from("in/cat_result.png"));
    }

    // Tests output paths default to siblings of the input
    // Verified by swapping the animation and result suffixes
    #[test]
    fn test_default_output_paths() {
        let cli = parse(&["-f", "photos/dog.jpg"]);
        assert_eq!(
            cli.animation_path(),
            PathBuf::from("photos/dog_trufflified.gif")
        );
        assert_eq!(cli.result_path(), PathBuf::from("photos/dog_result.png"));

        let bare = parse(&["-f", "dog.jpg"]);
        assert_eq!(bare.animation_path(), PathBuf::from("dog_trufflified.gif"));
    }

    // Tests an explicit seed is kept and an absent one is drawn
    // Verified by ignoring the parsed seed
    #[test]
    fn test_session_seed() {
        let seeded = Session::new(parse(&["-f", "a.png", "-s", "5"]));
        assert_eq!(seeded.seed(), 5);
        assert_eq!(seeded.cli().seed, Some(5));

        let random = Session::new(parse(&["-f", "a.png"]));
        assert_eq!(random.cli().seed, None);
    }

    // Tests a missing target aborts before any output is written
    // Verified by loading the source before the target
    #[test]
    fn test_missing_target_is_fatal() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("cat.png");
        write_image(&input, 4, 4, [10, 20, 30, 255]);
        let target = dir.path().join("nowhere.png");

        let session = Session::new(parse(&[
            "-f",
            input.to_str().expect("utf-8 path"),
            "-t",
            target.to_str().expect("utf-8 path"),
            "-q",
        ]));

        match session.run() {
            Err(TrufflifyError::MissingAsset { path, role }) => {
                assert_eq!(path, target);
                assert_eq!(role, "target");
            }
            other => panic!("expected missing target, got {other:?}"),
        }
        assert!(!session.cli().animation_path().exists());
    }

    // Tests zero frames is rejected as a parameter error
    // Verified by removing the frame count check
    #[test]
    fn test_zero_frames_rejected() {
        let session = Session::new(parse(&["-f", "a.png", "-n", "0", "-q"]));
        assert!(matches!(
            session.run(),
            Err(TrufflifyError::InvalidParameter {
                parameter: "frames",
                ..
            })
        ));
    }

    // Tests an evolve session writes the animation and a result the target's size
    // Verified by exporting the untouched source instead of the working grid
    #[test]
    fn test_evolve_session_end_to_end() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("cat.png");
        let target = dir.path().join("sauce.png");
        write_image(&input, 6, 4, [200, 10, 10, 255]);
        write_image(&target, 8, 8, [10, 10, 200, 255]);

        let session = Session::new(parse(&[
            "-f",
            input.to_str().expect("utf-8 path"),
            "-t",
            target.to_str().expect("utf-8 path"),
            "-n",
            "3",
            "--iterations-per-frame",
            "20",
            "-s",
            "11",
            "-q",
        ]));
        let summary = session.run().expect("session succeeds");

        assert_eq!(summary.mode, Mode::Evolve);
        assert_eq!(summary.seed, 11);
        assert_eq!(summary.frames, 3);
        assert!(summary.animation.is_file());

        let result = image::open(&summary.result)
            .expect("result is an image")
            .to_rgba8();
        assert_eq!(result.dimensions(), (8, 8));
    }

    // Tests a particle session exports the last frame, timed from the restart
    // Verified by exporting the first frame instead of the last, and by
    // ignoring the restart frame
    #[test]
    fn test_particle_session_end_to_end() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("cat.png");
        let target = dir.path().join("sauce.png");
        let animation = dir.path().join("out").join("morph.gif");
        write_image(&input, 5, 5, [250, 250, 250, 255]);
        write_image(&target, 3, 6, [0, 200, 0, 255]);

        let frames = 200;
        let restart_at = 150;
        let cli = parse(&[
            "-f",
            input.to_str().expect("utf-8 path"),
            "-t",
            target.to_str().expect("utf-8 path"),
            "-m",
            "particles",
            "-n",
            &frames.to_string(),
            "--viewport",
            "48",
            "--restart-at",
            &restart_at.to_string(),
            "-s",
            "21",
            "-o",
            animation.to_str().expect("utf-8 path"),
            "-q",
        ]);
        let config = cli.transport_config();
        let session = Session::new(cli);
        let summary = session.run().expect("session succeeds");

        assert_eq!(summary.animation, animation);
        assert!(animation.is_file());

        let transport = ParticleTransport::build_assignment(
            &load_pixel_grid(&input, "source").expect("source loads"),
            &load_pixel_grid(&target, "target").expect("target loads"),
            Viewport::square(48.0),
            &config,
            21,
        )
        .expect("valid layout");
        let frame_time = |index: u64| Duration::from_millis(u64::from(frame_delay_ms()) * index);
        let mut clock = TransportAnimation::new(transport.clone());
        clock.restart(frame_time(restart_at));
        let last_progress = clock.progress(frame_time(frames - 1));
        assert!(last_progress > 0.0 && last_progress < 1.0);

        let render = |t: f32| rasterize_points(&transport.positions_at(t), 48, 48, BACKGROUND);
        let result = image::open(&summary.result)
            .expect("result is an image")
            .to_rgba8();

        assert_eq!(result.dimensions(), (48, 48));
        assert!(result == render(last_progress), "result is not the last frame");
        assert!(result != render(0.0), "result shows the first frame");
        assert!(result != render(1.0), "restart was not applied");
    }
}
