//! CSV 파일 저장소.
//!
//! 수집한 시계열을 데이터 디렉토리의 평문 CSV로 보관합니다.
//!
//! ## 파일 형식
//!
//! ```csv
//! date,cpi_value,inflation_yoy_pct
//! 2001-01-01,175.6,3.7249850208...
//! ```
//!
//! | 파일 | 헤더 |
//! |------|------|
//! | `historical_inflation.csv` | `date,cpi_value,inflation_yoy_pct` |
//! | `yield_curve.csv` | `date,value` |
//! | `unemployment.csv` | `date,unemployment_rate` |
//!
//! 결측값은 빈 필드로 기록합니다. 읽을 때 숫자로 변환되지 않는 값은
//! 결측으로 처리합니다.
//!
//! 저장은 같은 디렉토리의 `*.csv.tmp`에 쓴 뒤 rename으로 교체하므로
//! 읽는 쪽은 항상 이전 파일 또는 완성된 새 파일만 봅니다.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use macro_core::{InflationRecord, Observation, SeriesId, TimeSeries};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DataError, Result};

/// 인플레이션 CSV 파일명.
pub const INFLATION_FILE: &str = "historical_inflation.csv";
/// 장단기 금리차 CSV 파일명.
pub const YIELD_CURVE_FILE: &str = "yield_curve.csv";
/// 실업률 CSV 파일명.
pub const UNEMPLOYMENT_FILE: &str = "unemployment.csv";

/// `historical_inflation.csv` 한 행.
#[derive(Debug, Serialize, Deserialize)]
struct InflationRow {
    #[serde(deserialize_with = "lenient_date")]
    date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_number")]
    cpi_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    inflation_yoy_pct: Option<f64>,
}

impl From<&InflationRecord> for InflationRow {
    fn from(record: &InflationRecord) -> Self {
        Self {
            date: Some(record.date),
            cpi_value: record.cpi_value,
            inflation_yoy_pct: record.inflation_yoy_pct,
        }
    }
}

/// 데이터 디렉토리 기반 CSV 저장소.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 데이터 디렉토리.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 시계열별 파일 경로.
    pub fn series_path(&self, id: SeriesId) -> PathBuf {
        match id {
            SeriesId::Cpi => self.dir.join(INFLATION_FILE),
            SeriesId::Unemployment => self.dir.join(UNEMPLOYMENT_FILE),
            SeriesId::YieldSpread => self.dir.join(YIELD_CURVE_FILE),
        }
    }

    /// 인플레이션 파일 존재 여부.
    pub fn has_inflation(&self) -> bool {
        self.series_path(SeriesId::Cpi).is_file()
    }

    /// 시계열 파일 존재 여부.
    pub fn has_series(&self, id: SeriesId) -> bool {
        self.series_path(id).is_file()
    }

    /// 인플레이션 레코드 저장 (덮어쓰기).
    pub fn save_inflation(&self, records: &[InflationRecord]) -> Result<usize> {
        let path = self.series_path(SeriesId::Cpi);
        self.replace(&path, |writer| {
            // 빈 목록이어도 헤더는 기록
            writer.write_record(["date", "cpi_value", "inflation_yoy_pct"])?;
            for record in records {
                writer.serialize(InflationRow::from(record))?;
            }
            Ok(())
        })?;

        info!(path = %path.display(), rows = records.len(), "인플레이션 CSV 저장");
        Ok(records.len())
    }

    /// 인플레이션 레코드 로드.
    ///
    /// 헤더의 컬럼명으로 필드를 찾으므로 컬럼 순서가 달라도 됩니다.
    pub fn load_inflation(&self) -> Result<Vec<InflationRecord>> {
        let path = self.series_path(SeriesId::Cpi);
        let mut reader = open_reader(&path)?;

        let headers = reader.headers()?.clone();
        for required in ["date", "cpi_value", "inflation_yoy_pct"] {
            if !headers.iter().any(|h| h == required) {
                return Err(DataError::InvalidData(format!(
                    "{}: {} 컬럼 없음",
                    path.display(),
                    required
                )));
            }
        }

        let mut records = Vec::new();
        for (line_num, row) in reader.deserialize::<InflationRow>().enumerate() {
            let row = row?;
            let Some(date) = row.date else {
                warn!(path = %path.display(), line = line_num + 2, "날짜 파싱 실패, 행 건너뜀");
                continue;
            };
            records.push(InflationRecord {
                date,
                cpi_value: row.cpi_value,
                inflation_yoy_pct: row.inflation_yoy_pct,
            });
        }

        records.sort_by_key(|r| r.date);
        debug!(path = %path.display(), rows = records.len(), "인플레이션 CSV 로드");
        Ok(records)
    }

    /// 단일 값 시계열 저장 (`date,<column>`).
    pub fn save_series(&self, series: &TimeSeries) -> Result<usize> {
        let path = self.series_path(series.id);
        self.replace(&path, |writer| {
            writer.write_record(["date", value_column(series.id)])?;
            for obs in &series.observations {
                let value = obs.value.map(|v| v.to_string()).unwrap_or_default();
                writer.write_record([obs.date.to_string(), value])?;
            }
            Ok(())
        })?;

        info!(series = %series.id, path = %path.display(), rows = series.len(), "시계열 CSV 저장");
        Ok(series.len())
    }

    /// 단일 값 시계열 로드.
    ///
    /// 첫 번째 컬럼은 날짜, 두 번째 컬럼은 값으로 읽습니다
    /// (pandas `Series.to_csv` 출력 포함).
    pub fn load_series(&self, id: SeriesId) -> Result<TimeSeries> {
        if id == SeriesId::Cpi {
            let observations = self
                .load_inflation()?
                .into_iter()
                .map(|r| Observation::new(r.date, r.cpi_value))
                .collect();
            return Ok(TimeSeries::new(id, observations));
        }

        let path = self.series_path(id);
        let mut reader = open_reader(&path)?;

        let mut observations = Vec::new();
        for record in reader.records() {
            let record = record?;
            let Some(date) = record.get(0).and_then(parse_date) else {
                continue;
            };
            observations.push(Observation::new(date, record.get(1).and_then(parse_number)));
        }

        let series = TimeSeries::new(id, observations);
        debug!(series = %id, rows = series.len(), "시계열 CSV 로드");
        Ok(series)
    }

    /// 임시 파일에 쓴 뒤 원래 경로로 교체.
    fn replace<F>(&self, path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut csv::Writer<std::fs::File>) -> Result<()>,
    {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = tmp_path(path);

        // 헤더는 각 저장 함수가 직접 기록
        let result = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(DataError::from)
            .and_then(|mut writer| {
                write(&mut writer)?;
                writer.flush()?;
                Ok(())
            });
        if let Err(e) = result {
            std::fs::remove_file(&tmp).ok();
            return Err(e);
        }

        std::fs::rename(&tmp, path)
            .map_err(|e| DataError::Io(format!("{} 교체 실패: {}", path.display(), e)))
    }
}

fn value_column(id: SeriesId) -> &'static str {
    match id {
        SeriesId::Cpi => "cpi_value",
        SeriesId::Unemployment => "unemployment_rate",
        SeriesId::YieldSpread => "value",
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>> {
    if !path.is_file() {
        return Err(DataError::NotFound(format!(
            "{} 파일이 없습니다. 먼저 데이터를 수집하세요",
            path.display()
        )));
    }
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // pandas가 시간 성분을 붙인 경우 ("2000-01-01 00:00:00")
    let date_part = raw.split_whitespace().next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_number))
}
