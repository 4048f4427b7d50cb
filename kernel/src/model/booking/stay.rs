use chrono::NaiveDate;
use shared::error::{AppError, AppResult};

/// 宿泊期間。半開区間 `[check_in, check_out)` として扱う。
/// 構築は `new` のみ。フィールドは非公開なので検査を迂回した値は作れない。
///
/// 日付のみの精度で保持するので、時刻の端数による宿泊数のブレは起きない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// `check_out > check_in` を満たさない期間は作れない。
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> AppResult<Self> {
        if check_out <= check_in {
            return Err(AppError::InvalidStayRange(format!(
                "チェックアウト日（{check_out}）はチェックイン日（{check_in}）より後である必要があります"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// 宿泊数。作成時の検査により必ず 1 以上になる。
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// 宿泊数 × 一泊料金。料金は予約作成時点の値で確定する。
    pub fn total_price(&self, price_per_night: i64) -> i64 {
        self.nights() * price_per_night
    }

    /// 半開区間同士の重なり判定。
    /// チェックアウト日とチェックイン日が同日で接する場合は重ならない。
    pub fn overlaps(&self, other: &StayRange) -> bool {
        other.check_in < self.check_out && other.check_out > self.check_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stay(check_in: &str, check_out: &str) -> StayRange {
        StayRange::new(date(check_in), date(check_out)).unwrap()
    }

    #[rstest]
    #[case("2024-06-01", "2024-06-01")]
    #[case("2024-06-04", "2024-06-01")]
    fn rejects_non_chronological_ranges(#[case] check_in: &str, #[case] check_out: &str) {
        let res = StayRange::new(date(check_in), date(check_out));
        assert!(matches!(res, Err(AppError::InvalidStayRange(_))));
    }

    #[test]
    fn single_night_is_the_minimum() {
        assert_eq!(stay("2024-06-01", "2024-06-02").nights(), 1);
    }

    #[rstest]
    #[case(1, 2000)]
    #[case(3, 6000)]
    #[case(7, 14000)]
    fn price_is_linear_in_nights(#[case] nights: i64, #[case] expected: i64) {
        let check_in = date("2024-06-01");
        let range = StayRange::new(check_in, check_in + chrono::Duration::days(nights)).unwrap();
        assert_eq!(range.total_price(2000), expected);
    }

    #[test]
    fn three_nights_at_2000_cost_6000() {
        assert_eq!(stay("2024-06-01", "2024-06-04").total_price(2000), 6000);
    }

    #[rstest]
    // チェックアウト日に次の予約が始まるのは重複ではない
    #[case("2024-03-05", "2024-03-10", false)]
    #[case("2024-02-20", "2024-03-01", false)]
    // 一部でも重なれば重複
    #[case("2024-03-03", "2024-03-07", true)]
    #[case("2024-03-04", "2024-03-05", true)]
    #[case("2024-02-28", "2024-03-02", true)]
    // 完全に包含する場合も重複
    #[case("2024-02-01", "2024-04-01", true)]
    fn half_open_overlap(#[case] check_in: &str, #[case] check_out: &str, #[case] expected: bool) {
        let existing = stay("2024-03-01", "2024-03-05");
        let candidate = stay(check_in, check_out);
        assert_eq!(existing.overlaps(&candidate), expected);
        // 判定は対称
        assert_eq!(candidate.overlaps(&existing), expected);
    }

    #[test]
    fn overlap_is_stable_across_repeated_checks() {
        let existing = stay("2024-03-01", "2024-03-05");
        let candidate = stay("2024-03-03", "2024-03-07");
        let first = existing.overlaps(&candidate);
        assert!((0..10).all(|_| existing.overlaps(&candidate) == first));
    }
}
