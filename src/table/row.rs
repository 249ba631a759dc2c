/// A single data row from a scaling table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingRow {
    pub x: f64,
    pub aux: f64,
    pub y: f64,
}

/// Three index-aligned columns: independent variable, auxiliary label, metric.
///
/// Columns only grow together through [`ScalingRecord::push`], so they always
/// have equal length. Row order is the file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalingRecord {
    x: Vec<f64>,
    aux: Vec<f64>,
    y: Vec<f64>,
}

impl ScalingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ScalingRow) {
        self.x.push(row.x);
        self.aux.push(row.aux);
        self.y.push(row.y);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn aux(&self) -> &[f64] {
        &self.aux
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

impl FromIterator<ScalingRow> for ScalingRecord {
    fn from_iter<I: IntoIterator<Item = ScalingRow>>(iter: I) -> Self {
        let mut record = ScalingRecord::new();
        for row in iter {
            record.push(row);
        }
        record
    }
}
