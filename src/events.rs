//! Historical price-shock events highlighted on the chart

use crate::data::HistoricalSeries;
use crate::error::Result;
use chrono::NaiveDate;

/// Named historical events, each mapped to a fixed date window used to
/// highlight a region of the historical chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceEvent {
    /// 2008 global financial crisis
    FinancialCrisis2008,
    /// 2014-2016 supply-glut price collapse
    SupplyGlut2014,
    /// 2020 COVID-19 demand collapse
    CovidPandemic2020,
    /// 2022 Russia-Ukraine war shock
    RussiaUkraineWar2022,
}

impl PriceEvent {
    /// All selectable events, in chronological order
    pub fn all() -> [PriceEvent; 4] {
        [
            PriceEvent::FinancialCrisis2008,
            PriceEvent::SupplyGlut2014,
            PriceEvent::CovidPandemic2020,
            PriceEvent::RussiaUkraineWar2022,
        ]
    }

    /// Display label for the event selector
    pub fn label(&self) -> &'static str {
        match self {
            PriceEvent::FinancialCrisis2008 => "Crise Financeira de 2008",
            PriceEvent::SupplyGlut2014 => "Queda de Preços de 2014-2016",
            PriceEvent::CovidPandemic2020 => "Pandemia de COVID-19",
            PriceEvent::RussiaUkraineWar2022 => "Guerra na Ucrânia",
        }
    }

    /// Narrative paragraph shown alongside the highlighted chart region
    pub fn description(&self) -> &'static str {
        match self {
            PriceEvent::FinancialCrisis2008 => {
                "A crise financeira global de 2008 derrubou a demanda por energia: \
                 o barril do Brent caiu de quase US$ 150 em julho para abaixo de \
                 US$ 40 no fim do ano."
            }
            PriceEvent::SupplyGlut2014 => {
                "Entre 2014 e 2016, o excesso de oferta impulsionado pelo xisto \
                 americano e a decisão da OPEP de manter a produção levaram o Brent \
                 de mais de US$ 110 para menos de US$ 30."
            }
            PriceEvent::CovidPandemic2020 => {
                "O colapso de demanda causado pela pandemia de COVID-19 em 2020 \
                 levou o Brent ao menor patamar em duas décadas, abaixo de US$ 20 \
                 em abril."
            }
            PriceEvent::RussiaUkraineWar2022 => {
                "A invasão da Ucrânia pela Rússia em fevereiro de 2022 gerou temor \
                 de escassez de oferta e levou o Brent acima de US$ 120."
            }
        }
    }

    /// Fixed (start, end) window of the event on the historical chart
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        match self {
            PriceEvent::FinancialCrisis2008 => (
                NaiveDate::from_ymd_opt(2008, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2009, 3, 1).unwrap(),
            ),
            PriceEvent::SupplyGlut2014 => (
                NaiveDate::from_ymd_opt(2014, 9, 1).unwrap(),
                NaiveDate::from_ymd_opt(2016, 2, 29).unwrap(),
            ),
            PriceEvent::CovidPandemic2020 => (
                NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 6, 30).unwrap(),
            ),
            PriceEvent::RussiaUkraineWar2022 => (
                NaiveDate::from_ymd_opt(2022, 2, 24).unwrap(),
                NaiveDate::from_ymd_opt(2022, 8, 31).unwrap(),
            ),
        }
    }

    /// Slice of the historical series covered by this event's window
    pub fn highlight(&self, series: &HistoricalSeries) -> Result<HistoricalSeries> {
        let (start, end) = self.window();
        series.filter_range(start, end)
    }
}
