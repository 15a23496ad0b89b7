use chrono::NaiveDate;
use shared::DailyMarksRecord;
use tracing::warn;

use crate::domain::daily_marks::DailyMarks;
use crate::domain::models::SubjectId;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Mapper for the `todayMarked_<studentId>` record.
///
/// Loading is lenient: an unreadable date counts as stale and unreadable
/// subject ids are skipped.
pub struct DailyMarksMapper;

impl DailyMarksMapper {
    pub fn to_domain(dto: DailyMarksRecord, today: NaiveDate) -> DailyMarks {
        let date = match NaiveDate::parse_from_str(&dto.date, DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                warn!("Ignoring daily marks with unreadable date {:?}: {}", dto.date, e);
                return DailyMarks::new(today);
            }
        };

        let ids = dto
            .marked
            .into_iter()
            .filter(|(_, marked)| *marked)
            .filter_map(|(key, _)| match key.parse::<SubjectId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!("Skipping daily mark for unreadable subject id {:?}", key);
                    None
                }
            });

        DailyMarks::restore(date, ids, today)
    }

    pub fn to_dto(domain: &DailyMarks) -> DailyMarksRecord {
        DailyMarksRecord {
            date: domain.date().format(DATE_FORMAT).to_string(),
            marked: domain.marked_ids().map(|id| (id.to_string(), true)).collect(),
        }
    }
}
