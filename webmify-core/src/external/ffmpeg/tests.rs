use super::*;

fn create_test_params() -> EncodeParams {
    EncodeParams {
        input_path: PathBuf::from("/test/in put.mkv"),
        output_path: PathBuf::from("/test/in put_720p.webm"),
        threads: 4,
        use_hw_decode: false,
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[test]
fn test_progress_goes_to_stdout() {
    let args = build_transcode_args(&create_test_params());
    assert_eq!(value_after(&args, "-progress"), Some("pipe:1"));
    assert_eq!(value_after(&args, "-loglevel"), Some("error"));
    assert!(args.contains(&"-y".to_string()));
}

#[test]
fn test_input_and_output_positions() {
    let args = build_transcode_args(&create_test_params());
    assert_eq!(value_after(&args, "-i"), Some("/test/in put.mkv"));
    assert_eq!(args.last().map(String::as_str), Some("/test/in put_720p.webm"));
}

#[test]
fn test_video_and_audio_recipe() {
    let args = build_transcode_args(&create_test_params());
    assert_eq!(value_after(&args, "-vf"), Some(SCALE_PAD_FILTER));
    assert_eq!(value_after(&args, "-c:v"), Some("libvpx-vp9"));
    assert_eq!(value_after(&args, "-b:v"), Some("0"));
    assert_eq!(value_after(&args, "-crf"), Some("32"));
    assert_eq!(value_after(&args, "-tile-columns"), Some("2"));
    assert_eq!(value_after(&args, "-c:a"), Some("libopus"));
    assert_eq!(value_after(&args, "-b:a"), Some("96k"));
}

#[test]
fn test_thread_count_is_at_least_one() {
    let mut params = create_test_params();
    assert_eq!(value_after(&build_transcode_args(&params), "-threads"), Some("4"));

    params.threads = 0;
    assert_eq!(value_after(&build_transcode_args(&params), "-threads"), Some("1"));
}

#[test]
fn test_hwaccel_only_when_supported() {
    let mut params = create_test_params();
    params.use_hw_decode = true;

    let mut cmd = build_ffmpeg_command(&params);
    let args: Vec<String> = cmd
        .as_inner()
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let hwaccel = args.iter().position(|a| a == "-hwaccel");
    let input = args.iter().position(|a| a == "-i");
    if crate::hardware_decode::is_macos() {
        assert!(hwaccel.is_some_and(|h| input.is_some_and(|i| h < i)));
    } else {
        assert!(hwaccel.is_none());
    }
}
