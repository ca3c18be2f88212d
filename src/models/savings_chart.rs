// ============================================================================
// Structure : SavingsChart
// ============================================================================
// Regroupe les économies journalières (renvoyées par le backend) en deux
// séries affichables : la semaine en cours et le mois en cours
//
// CONCEPTS RUST :
// 1. NaiveDate (chrono) : dates sans fuseau, comparaisons simples
// 2. Weekday::num_days_from_monday() : calcul du lundi de la semaine
// 3. Enum cyclique (ChartPeriod) : toggle() bascule semaine / mois
// ============================================================================

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

/// Période affichée sur le graphique du profil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartPeriod {
    /// Semaine en cours (lundi → dimanche)
    #[default]
    Weekly,
    /// Mois en cours (jours avec économies uniquement)
    Monthly,
}

impl ChartPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ChartPeriod::Weekly => "Weekly",
            ChartPeriod::Monthly => "Monthly",
        }
    }

    /// Bascule entre les deux périodes
    pub fn toggle(&self) -> ChartPeriod {
        match self {
            ChartPeriod::Weekly => ChartPeriod::Monthly,
            ChartPeriod::Monthly => ChartPeriod::Weekly,
        }
    }
}

/// Libellés des jours, dimanche en premier (ordre du graphique)
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Une série : libellés de l'axe X et valeurs associées
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Vrai si aucune valeur n'est positive (rien à dessiner)
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|v| *v <= Decimal::ZERO)
    }

    /// Plus grande valeur (pour l'échelle de l'axe Y)
    pub fn max_value(&self) -> Option<Decimal> {
        self.values.iter().copied().max()
    }
}

/// Séries hebdomadaire et mensuelle prêtes à afficher
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsChart {
    pub weekly: Series,
    pub monthly: Series,
}

impl SavingsChart {
    /// Construit les deux séries à partir de la carte `date → montant`
    ///
    /// # Arguments
    /// * `daily` - Clés "YYYY-MM-DD" (un suffixe horaire est toléré)
    /// * `today` - Date de référence (injectée pour les tests)
    ///
    /// Les clés illisibles sont ignorées avec un warning.
    pub fn from_daily(daily: &BTreeMap<String, Decimal>, today: NaiveDate) -> Self {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let next_monday = monday + Duration::days(7);

        let mut weekly = [Decimal::ZERO; 7];
        let mut monthly: BTreeMap<u32, Decimal> = BTreeMap::new();

        for (key, &amount) in daily {
            let date = match parse_day(key) {
                Some(date) => date,
                None => {
                    warn!(key = %key, "Skipping chart entry with unreadable date");
                    continue;
                }
            };

            if date >= monday && date < next_monday {
                let slot = date.weekday().num_days_from_sunday() as usize;
                weekly[slot] = amount;
            }

            if date.year() == today.year() && date.month() == today.month() {
                monthly.insert(date.day(), amount);
            }
        }

        let weekly = Series {
            labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
            values: weekly.to_vec(),
        };

        // Le mois ne garde que les jours avec une économie, dans l'ordre
        let (labels, values) = monthly
            .into_iter()
            .filter(|(_, amount)| *amount > Decimal::ZERO)
            .map(|(day, amount)| (day.to_string(), amount))
            .unzip();

        Self {
            weekly,
            monthly: Series { labels, values },
        }
    }

    /// Série correspondant à la période demandée
    pub fn series(&self, period: ChartPeriod) -> &Series {
        match period {
            ChartPeriod::Weekly => &self.weekly,
            ChartPeriod::Monthly => &self.monthly,
        }
    }
}

/// Lit les 10 premiers caractères d'une clé comme une date ISO
fn parse_day(key: &str) -> Option<NaiveDate> {
    let day = key.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(units: i64, scale: u32) -> Decimal {
        Decimal::new(units, scale)
    }

    fn daily(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_weekly_buckets_current_week_only() {
        // Mercredi 15 mai 2024 : semaine du lundi 13 au dimanche 19
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let data = daily(&[
            ("2024-05-12", dec(100, 2)), // dimanche précédent : hors semaine
            ("2024-05-13", dec(400, 2)), // lundi
            ("2024-05-15", dec(150, 2)), // mercredi
            ("2024-05-19", dec(200, 2)), // dimanche de la semaine
        ]);

        let chart = SavingsChart::from_daily(&data, today);

        assert_eq!(chart.weekly.labels[0], "Sun");
        assert_eq!(chart.weekly.len(), 7);
        assert_eq!(chart.weekly.values[0], dec(200, 2)); // Sun 19
        assert_eq!(chart.weekly.values[1], dec(400, 2)); // Mon 13
        assert_eq!(chart.weekly.values[3], dec(150, 2)); // Wed 15
        assert_eq!(chart.weekly.values[2], Decimal::ZERO);
    }

    #[test]
    fn test_monthly_keeps_positive_days_sorted() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let data = daily(&[
            ("2024-05-20", dec(300, 2)),
            ("2024-05-02", dec(100, 2)),
            ("2024-05-10", Decimal::ZERO),
            ("2024-04-30", dec(999, 2)), // autre mois
            ("2023-05-03", dec(999, 2)), // autre année
        ]);

        let chart = SavingsChart::from_daily(&data, today);

        assert_eq!(chart.monthly.labels, vec!["2".to_string(), "20".to_string()]);
        assert_eq!(chart.monthly.values, vec![dec(100, 2), dec(300, 2)]);
        assert_eq!(chart.series(ChartPeriod::Monthly).max_value(), Some(dec(300, 2)));
    }

    #[test]
    fn test_invalid_keys_are_skipped() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let data = daily(&[("hier", dec(100, 2)), ("2024-05-14T10:00:00", dec(50, 2))]);

        let chart = SavingsChart::from_daily(&data, today);

        assert_eq!(chart.weekly.values[2], dec(50, 2)); // Tue 14
        assert_eq!(chart.monthly.len(), 1);
    }

    #[test]
    fn test_empty_data_gives_blank_week() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let chart = SavingsChart::from_daily(&BTreeMap::new(), today);

        assert!(chart.weekly.is_blank());
        assert!(chart.monthly.is_empty());
    }

    #[test]
    fn test_chart_period_toggle() {
        assert_eq!(ChartPeriod::default(), ChartPeriod::Weekly);
        assert_eq!(ChartPeriod::Weekly.toggle(), ChartPeriod::Monthly);
        assert_eq!(ChartPeriod::Monthly.toggle(), ChartPeriod::Weekly);
    }
}
