use crate::prelude::*;
use std::{fs::OpenOptions, io::Write as IoWrite};

pub const LOG_FILE_NAME: &str = "vpf.log";

#[inline]
fn format_record(record: &log::Record) -> String {
	format!("[{}] [{}] {}", record.level(), record.module_path().unwrap_or("?"), record.args())
}

struct VPFLoggerFile(Mutex<File>);
impl VPFLoggerFile {
	fn new() -> std::io::Result<Self> {
		let mut f = OpenOptions::new().append(true).create(true).open(std::env::temp_dir().join(LOG_FILE_NAME))?;
		writeln!(f, "============ VPF LOG {} ============", std::time::SystemTime::now().duration_since(std::time::SystemTime::UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)).ok();
		Ok(VPFLoggerFile(Mutex::new(f)))
	}
}
impl log::Log for VPFLoggerFile {
	#[inline]
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &log::Record) {
		if !self.enabled(record.metadata()) { return };

		let text = format_record(record);
		println!("{text}");
		writeln!(&mut *self.0.lock(), "{text}").ok();
	}

	fn flush(&self) {
		self.0.lock().flush().ok();
	}
}

struct VPFLogger;
impl log::Log for VPFLogger {
	#[inline]
	fn enabled(&self, metadata: &log::Metadata) -> bool {
		metadata.level() <= log::max_level()
	}

	fn log(&self, record: &log::Record) {
		if !self.enabled(record.metadata()) { return };
		println!("{}", format_record(record));
	}

	fn flush(&self) {}
}

pub fn init(verbose: bool, dump_logs: bool) {
	log::set_max_level(if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info });

	let logger: Box<dyn log::Log> = if dump_logs {
		match VPFLoggerFile::new() {
			Ok(logger) => Box::new(logger),
			Err(err) => {
				eprintln!("Failed to open {LOG_FILE_NAME} in the temp directory ({err}), logging to stdout only");
				Box::new(VPFLogger)
			}
		}
	} else {
		Box::new(VPFLogger)
	};

	if log::set_logger(Box::leak(logger)).is_err() {
		eprintln!("A logger was already installed");
	}
}
