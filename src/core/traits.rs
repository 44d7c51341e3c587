use ndarray::*;

/// Objects that contribute columns to the tab-separated result files.
pub trait SaveData {
    /// Tab-separated column names, units included
    fn get_headers(&self) -> String;
    fn num_storable_variables(&self) -> usize;
    fn get_storable_data(&self) -> Array1<f64>;
}
