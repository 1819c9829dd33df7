mod logs;
mod settings;

use clap::Parser;
use prelude::*;
use vpf_util::anyhow::Context;

mod prelude {
	pub(crate) use vpf_vision_cpu::prelude::*;
}

#[derive(Parser, Debug)]
#[command(name = "vpf")]
#[command(about = "Finds the camera viewport rectangle drawn on the minimap of a game screenshot")]
#[command(version)]
struct Args {
	/// Save the intermediate images of every detection and print stage timings
	#[arg(long)]
	debug: bool,

	/// Log at debug level
	#[arg(short, long)]
	verbose: bool,

	/// Also append logs to vpf.log in the temp directory
	#[arg(long)]
	dumplogs: bool,

	/// Detector settings, defaults to settings.json in the working directory
	#[arg(long)]
	settings: Option<PathBuf>,

	/// Where debug images are written
	#[arg(short, long, default_value = ".")]
	output: PathBuf,

	/// Text file with one image path per line
	#[arg(long)]
	list: Option<PathBuf>,

	/// Images to search
	images: Vec<PathBuf>,
}

fn main() {
	let args = Args::parse();

	logs::init(args.verbose, args.dumplogs);

	if let Err(err) = run(args) {
		log::error!("{err:#}");
		std::process::exit(1);
	}
}

fn run(args: Args) -> Result<(), AnyError> {
	let config = settings::load(args.settings.as_deref())?;
	let detector = Detector::new(config, args.debug)?;
	log::debug!("detector settings: {:?}", detector.config());

	let mut inputs = args.images;
	if let Some(list) = &args.list {
		let contents = std::fs::read_to_string(list).with_context(|| format!("couldn't read image list {}", list.display()))?;
		inputs.extend(parse_list(&contents));
	}
	if inputs.is_empty() {
		anyhow::bail!("no input images given");
	}

	if detector.is_debug() {
		std::fs::create_dir_all(&args.output).with_context(|| format!("couldn't create output directory {}", args.output.display()))?;
	}

	log::debug!("searching {} images", inputs.len());

	let detections = inputs.par_iter().map(|path| detect_file(&detector, path)).collect::<Vec<_>>();

	for (index, (path, detection)) in inputs.iter().zip(detections).enumerate() {
		let detection = match detection {
			Ok(detection) => detection,
			Err(err) => {
				log::error!("Skipping {}: {err:#}", path.display());
				continue;
			}
		};

		if inputs.len() > 1 {
			println!("{}", path.display());
		}

		match &detection.result {
			Some(result) => {
				println!("Detected viewport at {}", result.absolute);
				println!("Relative position in detection area: {}", result.normalized);
			},
			None => eprintln!("No viewport found.")
		}

		if let Some(trace) = &detection.trace {
			save_trace(&args.output, path, index, trace);
			print_timeshares(&trace.timeshares);
		}
	}

	Ok(())
}

fn detect_file(detector: &Detector, path: &Path) -> Result<Detection, AnyError> {
	let image = image::open(path).with_context(|| format!("couldn't decode {}", path.display()))?;
	Ok(detector.detect(&image)?)
}

/// One path per line, skipping blank lines and `#` comments
fn parse_list(contents: &str) -> impl Iterator<Item = PathBuf> + '_ {
	contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(PathBuf::from)
}

fn debug_image_path(output: &Path, input: &Path, index: usize, label: &str) -> PathBuf {
	let stem = input.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or(Cow::Borrowed("image"));
	output.join(format!("{stem}_{index}_{label}.png"))
}

fn save_trace(output: &Path, input: &Path, index: usize, trace: &DebugTrace) {
	for (label, choice) in DebugImage::variants() {
		let image = match trace.image(choice) {
			Some(image) => image,
			None => continue
		};

		let path = debug_image_path(output, input, index, label);
		match image.save(&path) {
			Ok(_) => log::info!("Saved {}", path.display()),
			Err(err) => log::warn!("Failed to save {}: {err}", path.display())
		}
	}
}

fn print_timeshares(timeshares: &Timeshares) {
	for (name, duration) in timeshares.iter() {
		println!("{name}: {:.3}ms", duration.as_secs_f64() * 1000.0);
	}
	println!("Total: {:.3}ms", timeshares.total().as_secs_f64() * 1000.0);
	if let Some(entire_frame) = timeshares.entire_frame {
		println!("Entire frame: {:.3}ms", entire_frame.as_secs_f64() * 1000.0);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn image_list() {
		let list = "a.png\n\n  # screenshots from patch 13.1\n  b.jpg  \n#c.png\n";
		assert_eq!(parse_list(list).collect::<Vec<_>>(), [PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
	}

	#[test]
	fn debug_image_names() {
		let path = debug_image_path(Path::new("out"), Path::new("shots/minimap.png"), 3, "bw");
		assert_eq!(path, Path::new("out").join("minimap_3_bw.png"));
	}

	#[test]
	fn arguments() {
		let args = Args::try_parse_from(["vpf", "--debug", "-o", "dbg", "a.png", "b.png"]).unwrap();
		assert!(args.debug && !args.verbose && !args.dumplogs);
		assert_eq!(args.output, PathBuf::from("dbg"));
		assert_eq!(args.images, [PathBuf::from("a.png"), PathBuf::from("b.png")]);
	}

	#[test]
	fn detects_decoded_file() {
		let mut image = GrayImage::new(40, 40);
		for i in 0..12 {
			image.put_pixel(5, 5 + i, Luma([255]));
			image.put_pixel(5 + i, 16, Luma([255]));
		}

		let path = std::env::temp_dir().join(format!("vpf-main-{}.png", std::process::id()));
		image.save(&path).unwrap();

		let config = DetectorConfig { detection_area: DetectionArea::FULL, ..Default::default() };
		let detection = detect_file(&Detector::new(config, false).unwrap(), &path);
		std::fs::remove_file(&path).ok();

		let result = detection.unwrap().result.unwrap();
		assert_eq!(result.absolute, Rect::new(5, 5, 16, 16));
	}
}
