use std::{
    fmt,
    fs::{read_dir, remove_file, rename, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex as StdMutex,
    thread,
};

use anyhow::{anyhow, Context};

use chrono::prelude::*;

use flate2::{write::GzEncoder, Compression};

use log::*;

use log4rs::{
    append::{
        rolling_file::{
            policy::compound::{roll::Roll, trigger::Trigger, CompoundPolicy},
            LogFile,
            RollingFileAppender,
        },
        Append,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::{Filter, Response},
};

#[cfg(unix)]
use termion::color;

const FILE_SIZE_LIMIT: u64 = 50_000_000;

#[cfg(debug_assertions)]
const LEVEL_FILTER: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const LEVEL_FILTER: LevelFilter = LevelFilter::Info;

/// Configures log4rs for a mod: colored console output plus a rolling log file.
///
/// Debug and trace records are only accepted from modules whose path starts with `crate_filter`.
/// Console lines have the form `[HH:MM:SS Level]: message`. The current log is written to
/// `latest.log` inside `directory`, which is rolled into `yyyy-mm-dd-#.log.gz` when a new day
/// starts or when it grows past a size limit.
pub fn init_logger(crate_filter: &str, directory: &Path) -> anyhow::Result<()> {
    let roller = CustomLogRoller::new(directory);
    let logfile = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new("[{d(%H:%M:%S)} {l}]: {m}\n")))
        .build(
            directory.join("latest.log"),
            Box::new(CompoundPolicy::new(
                Box::new(CustomLogTrigger::new(FILE_SIZE_LIMIT)),
                Box::new(roller),
            )),
        )
        .with_context(|| format!("Failed to open log file in {}", directory.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(CrateFilter::new(crate_filter)))
                .build("console", Box::new(ConsoleAppender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(CrateFilter::new(crate_filter)))
                .build("logfile", Box::new(logfile)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("logfile")
                .build(LEVEL_FILTER),
        )?;

    log4rs::init_config(config)?;

    Ok(())
}

struct CrateFilter {
    filter: String,
}

impl CrateFilter {
    fn new(filter: &str) -> Self {
        CrateFilter {
            filter: filter.to_owned(),
        }
    }
}

impl Filter for CrateFilter {
    fn filter(&self, record: &Record) -> Response {
        if record.level() < Level::Debug {
            return Response::Neutral;
        }

        match record.module_path() {
            Some(path) if path.starts_with(&self.filter) => Response::Accept,
            _ => Response::Reject,
        }
    }
}

impl fmt::Debug for CrateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrateFilter").field("filter", &self.filter).finish()
    }
}

#[derive(Debug)]
struct ConsoleAppender;

impl Append for ConsoleAppender {
    #[cfg(unix)]
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        match record.metadata().level() {
            Level::Error => write!(writer, "{}", color::Fg(color::Red))?,
            Level::Warn => write!(writer, "{}", color::Fg(color::LightYellow))?,
            Level::Debug | Level::Trace => write!(writer, "{}", color::Fg(color::LightCyan))?,
            _ => write!(writer, "{}", color::Fg(color::Reset))?,
        }
        writeln!(
            writer,
            "[{} {}]: {}{}",
            Local::now().format("%H:%M:%S"),
            record.metadata().level(),
            record.args(),
            color::Fg(color::Reset)
        )?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        writeln!(
            writer,
            "[{} {}]: {}",
            Local::now().format("%H:%M:%S"),
            record.metadata().level(),
            record.args()
        )?;
        Ok(())
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

// Rolls the log when it gets too large or a new day starts
#[derive(Debug)]
struct CustomLogTrigger {
    last_day: StdMutex<u32>,
    max_size: u64,
}

impl CustomLogTrigger {
    fn new(max_size: u64) -> Self {
        CustomLogTrigger {
            last_day: StdMutex::new(Local::now().ordinal()),
            max_size,
        }
    }

    fn should_roll(&self, len: u64) -> bool {
        if let Ok(mut guard) = self.last_day.lock() {
            let current_day = Local::now().ordinal();
            if current_day != *guard {
                *guard = current_day;
                return true;
            }
        }

        len > self.max_size
    }
}

impl Trigger for CustomLogTrigger {
    fn trigger(&self, file: &LogFile<'_>) -> anyhow::Result<bool> {
        Ok(self.should_roll(file.len_estimate()))
    }

    fn is_pre_process(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct CustomLogRoller {
    directory: PathBuf,
    // Current day, log count for today
    name_info: StdMutex<(u32, u32)>,
}

impl CustomLogRoller {
    fn new(directory: &Path) -> Self {
        let today = Local::now().format("%Y-%m-%d").to_string();

        // Resume numbering after the highest index already written today
        let max_index = read_dir(directory)
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|entry| entry.file_name().into_string().ok())
                    .filter(|name| name.starts_with(&today))
                    .filter_map(|name| Self::index_from_name(&name))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);

        CustomLogRoller {
            directory: directory.to_owned(),
            name_info: StdMutex::new((Local::now().ordinal(), max_index)),
        }
    }

    fn index_from_name(name: &str) -> Option<u32> {
        let dash_index = name.rfind('-')?;
        let dot_index = name.find('.')?;
        if dash_index + 1 < dot_index {
            name[dash_index + 1 .. dot_index].parse::<u32>().ok()
        } else {
            None
        }
    }

    fn next_index(&self) -> anyhow::Result<u32> {
        let mut guard = self
            .name_info
            .lock()
            .map_err(|_| anyhow!("Log roller mutex poisoned"))?;

        let today = Local::now().ordinal();
        if today != guard.0 {
            *guard = (today, 1);
        } else {
            guard.1 += 1;
        }

        Ok(guard.1)
    }

    /// Moves the given log aside and picks the archive it will be compressed into. Returns the
    /// moved file and the archive path.
    fn set_aside(&self, file: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
        let index = self.next_index()?;

        // Move the file out of the way first in case compression takes a while
        let pending = self.directory.join("latest-tmp.log");
        rename(file, &pending)
            .with_context(|| format!("Failed to move {} aside", file.display()))?;

        let output = self.directory.join(format!(
            "{}-{}.log.gz",
            Local::now().format("%Y-%m-%d"),
            index
        ));

        Ok((pending, output))
    }

    fn try_compress_log(input_path: &Path, output_path: &Path) {
        if let Err(e) = Self::compress_log(input_path, output_path) {
            error!("Failed to compress log file: {}", e);
        }
    }

    fn compress_log(input_path: &Path, output_path: &Path) -> io::Result<()> {
        let mut input = File::open(input_path)?;
        let mut output = GzEncoder::new(File::create(output_path)?, Compression::default());
        io::copy(&mut input, &mut output)?;
        output.finish()?;
        // Some platforms refuse to delete an open file
        drop(input);
        remove_file(input_path)
    }
}

impl Roll for CustomLogRoller {
    fn roll(&self, file: &Path) -> anyhow::Result<()> {
        let (pending, output) = self.set_aside(file)?;
        thread::spawn(move || Self::try_compress_log(&pending, &output));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::{env, fs, io::Read, process};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("modbase-logs-{}-{}", name, process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn roller_index_parsing() {
        assert_eq!(CustomLogRoller::index_from_name("2026-10-19-3.log.gz"), Some(3));
        assert_eq!(CustomLogRoller::index_from_name("2026-10-19-12.log.gz"), Some(12));
        assert_eq!(CustomLogRoller::index_from_name("latest.log"), None);
    }

    #[test]
    fn crate_filter() {
        let filter = CrateFilter::new("modbase");
        let record = |level, module| {
            let response = filter.filter(
                &Record::builder()
                    .level(level)
                    .module_path(Some(module))
                    .build(),
            );
            if matches!(response, Response::Accept) {
                "accept"
            } else if matches!(response, Response::Reject) {
                "reject"
            } else {
                "neutral"
            }
        };

        assert_eq!(record(Level::Debug, "modbase::block::codec"), "accept");
        assert_eq!(record(Level::Trace, "modbase_util::logging"), "accept");
        assert_eq!(record(Level::Debug, "log4rs::append"), "reject");
        assert_eq!(record(Level::Info, "log4rs::append"), "neutral");
        assert_eq!(record(Level::Error, "modbase::block"), "neutral");
    }

    #[test]
    fn trigger_on_size_and_day() {
        let trigger = CustomLogTrigger::new(100);
        assert!(!trigger.should_roll(100));
        assert!(trigger.should_roll(101));

        // A trigger last fired on another day rolls once, then waits for the size limit again
        let trigger = CustomLogTrigger {
            last_day: StdMutex::new(Local::now().ordinal() % 366 + 1),
            max_size: 100,
        };
        assert!(trigger.should_roll(0));
        assert!(!trigger.should_roll(0));
    }

    #[test]
    fn rolled_logs_are_compressed() {
        let dir = scratch_dir("roll");
        let today = Local::now().format("%Y-%m-%d").to_string();
        fs::write(dir.join(format!("{}-4.log.gz", today)), b"").unwrap();

        let latest = dir.join("latest.log");
        fs::write(&latest, "[12:00:00 INFO]: Defined block test:lamp with 8 states\n").unwrap();

        let roller = CustomLogRoller::new(&dir);
        let (pending, output) = roller.set_aside(&latest).unwrap();
        assert!(!latest.exists());
        assert_eq!(output, dir.join(format!("{}-5.log.gz", today)));

        CustomLogRoller::compress_log(&pending, &output).unwrap();
        assert!(!pending.exists());

        let mut contents = String::new();
        GzDecoder::new(File::open(&output).unwrap())
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "[12:00:00 INFO]: Defined block test:lamp with 8 states\n");

        fs::remove_dir_all(&dir).unwrap();
    }

    // The only test in this crate that installs the global logger
    #[test]
    fn logger_writes_latest_log() {
        let dir = scratch_dir("init");
        init_logger("modbase_util", &dir).unwrap();
        info!("Logger online");

        let latest = fs::read_to_string(dir.join("latest.log")).unwrap();
        assert!(latest.contains("INFO]: Logger online"), "{}", latest);

        // Only one logger may be installed per process
        assert!(init_logger("modbase_util", &dir).is_err());
    }
}
