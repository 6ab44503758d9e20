//! Local-maximum picking.

/// Indices of local maxima in `values` strictly above `min_height`.
///
/// A flat plateau at a maximum reports a single index, the first sample of
/// the plateau. Series endpoints are never maxima.
pub fn find_peaks(values: &[f32], min_height: f32) -> Vec<usize> {
    let mut peaks = Vec::new();
    let n = values.len();
    if n < 3 {
        return peaks;
    }

    let mut i = 1;
    while i < n - 1 {
        if values[i] <= values[i - 1] {
            i += 1;
            continue;
        }

        // Rising edge at i; walk to the end of any plateau.
        let mut j = i;
        while j + 1 < n && values[j + 1] == values[i] {
            j += 1;
        }

        // A plateau reaching the last sample has no falling edge.
        if j + 1 < n && values[j + 1] < values[i] && values[i] > min_height {
            peaks.push(i);
        }

        i = j + 1;
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_peak_is_found() {
        let values = [0.0, 1.0, 0.0];
        assert_eq!(find_peaks(&values, 0.5), vec![1]);
    }

    #[test]
    fn peaks_below_min_height_are_ignored() {
        let values = [0.0, 1.0, 0.0, 0.3, 0.0];
        assert_eq!(find_peaks(&values, 0.5), vec![1]);
    }

    #[test]
    fn plateau_reports_first_sample_only() {
        let values = [0.0, 2.0, 2.0, 2.0, 0.0];
        assert_eq!(find_peaks(&values, 0.5), vec![1]);
    }

    #[test]
    fn endpoints_are_not_peaks() {
        let rising = [0.0, 1.0, 2.0];
        assert!(find_peaks(&rising, 0.5).is_empty());
        let falling = [2.0, 1.0, 0.0];
        assert!(find_peaks(&falling, 0.5).is_empty());
    }

    #[test]
    fn plateau_running_off_the_end_is_not_a_peak() {
        let values = [0.0, 2.0, 2.0, 2.0];
        assert!(find_peaks(&values, 0.5).is_empty());
    }

    #[test]
    fn multiple_peaks_in_order() {
        let values = [0.0, 3.0, 0.0, 4.0, 0.0, 5.0, 0.0];
        assert_eq!(find_peaks(&values, 1.0), vec![1, 3, 5]);
    }

    #[test]
    fn too_short_series_yields_nothing() {
        assert!(find_peaks(&[1.0, 2.0], 0.0).is_empty());
        assert!(find_peaks(&[], 0.0).is_empty());
    }
}
