use image::error::ImageError;

use quadtree_unblur::{Containment, ImageSurface, Options, Quadtree, RevealPolicy, Shape};

use tracing_subscriber::EnvFilter;

use std::path::{Path, PathBuf};

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// Parses an `X,Y` focus point.
fn parse_point(s: &str) -> Option<(f64, f64)> {
	let mut parts = s.splitn(2, ',');
	let x = parts.next()?.trim().parse().ok()?;
	let y = parts.next()?.trim().parse().ok()?;
	Some((x, y))
}

/// INPUT with its extension, if any, replaced by `.unblur.png`.
fn default_output(input_path: &str) -> PathBuf {
	Path::new(input_path).with_extension("unblur.png")
}

/// `clap`-based CLI that unblurs an image around a series of focus points
/// and saves the result.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	tracing_subscriber::fmt()
		.with_target(true)
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let clap_matches = clap::App::new("quadtree_unblur")
		.version("0.1.0")
		.author("vkcz")
		.about("Blurs a square image into a quadtree of average colors and unblurs it around focus points.")
		.arg(clap::Arg::with_name("point")
			.short("p")
			.long("point")
			.value_name("X,Y")
			.help("Focus point to reveal around; may be given several times and is replayed in order")
			.takes_value(true)
			.multiple(true)
			.number_of_values(1))
		.arg_from_usage("-r, --repeat=[N] 'Number of reveals per focus point; defaults to 1'")
		.arg_from_usage("-H, --height=[N] 'Quadtree height; defaults to the deepest the image side allows'")
		.arg_from_usage("-c, --circles 'Draw each region as an inscribed circle instead of a square'")
		.arg_from_usage("--cascade 'Also expand the children of every node a reveal expands'")
		.arg_from_usage("--half-open 'Let region edges include their top and left lines'")
		.arg_from_usage("<INPUT> 'Path to input image; must be square'")
		.arg_from_usage("[OUTPUT] 'Path to output PNG; defaults to INPUT with a modified file extension'")
		.get_matches();

	let repeat = match clap_matches.value_of("repeat").unwrap_or("1").parse::<usize>() {
		Ok(n) => n,
		Err(_) => error_exit("Non-numeric value for repeat", 2)
	};
	let height = match clap_matches.value_of("height").map(str::parse::<u32>) {
		None => None,
		Some(Ok(n)) => Some(n),
		Some(Err(_)) => error_exit("Non-numeric value for height", 2)
	};
	let points = clap_matches.values_of("point")
		.map(|values| values.map(|v| match parse_point(v) {
			Some(p) => p,
			None => error_exit("Focus points must be given as X,Y", 2)
		}).collect::<Vec<_>>())
		.unwrap_or_default();
	let options = Options {
		height,
		containment: if clap_matches.is_present("half-open") {
			Containment::HalfOpen
		} else {
			Containment::Strict
		},
		reveal: if clap_matches.is_present("cascade") {
			RevealPolicy::Cascade
		} else {
			RevealPolicy::OneLevel
		},
	};
	let shape = if clap_matches.is_present("circles") { Shape::Circle } else { Shape::Square };

	let input_path = match clap_matches.value_of("INPUT") {
		Some(p) => p,
		None => error_exit("Missing input path", 2)
	};
	let source = match image::open(input_path) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgb8();

	let (mut tree, report) = match Quadtree::from_source(&source, options) {
		Ok(r) => r,
		Err(e) => error_exit(&format!("Input image has invalid dimensions: {}", e), 4)
	};
	eprintln!("{} pixels inserted, {} dropped, height {}", report.inserted, report.dropped, tree.height());

	for &(x, y) in points.iter() {
		for _ in 0..repeat {
			tree.reveal(x, y);
		}
	}

	let side = tree.region().side_len;
	let mut surface = ImageSurface::new(side, side, shape);
	tree.draw(&mut surface);
	let output_path = clap_matches.value_of("OUTPUT")
		.map(PathBuf::from)
		.unwrap_or_else(|| default_output(input_path));
	match surface.into_image().save(&output_path) {
		Ok(_) => (),
		Err(_) => error_exit("Could not save output", 3)
	}
}
