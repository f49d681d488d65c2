//! Conservative regridding of piecewise-constant histograms.
//!
//! Each source bin's value is spread over the destination bins it overlaps,
//! in proportion to `overlap / source_width`. As long as the destination
//! edges cover the source span, the destination total equals the source
//! total.

use crate::error::AepError;

/// Largest number of destination bins a regrid may produce.
pub const MAX_REGRID_BINS: usize = 100_000;

/// Whole `width` steps needed to cover `span`, snapping ratios within float
/// noise of an integer so 3.0 / 0.5 stays 6.
fn steps_to_cover(span: f64, width: f64) -> f64 {
    let ratio = span.max(0.0) / width;
    let rounded = ratio.round();
    if (ratio - rounded).abs() < 1e-9 {
        rounded
    } else {
        ratio.ceil()
    }
}

/// Builds uniform edges of width `width` starting at `lo` and covering `hi`.
///
/// Produces `ceil((hi - lo) / width)` bins (at least one). The final edge may
/// lie beyond `hi` when the span is not a whole multiple of `width`.
///
/// # Errors
///
/// Returns `AepError::Validation` when the span is not finite or needs more
/// than [`MAX_REGRID_BINS`] bins.
pub fn uniform_edges(lo: f64, hi: f64, width: f64) -> Result<Vec<f64>, AepError> {
    let count = steps_to_cover(hi - lo, width);
    if !count.is_finite() || count > MAX_REGRID_BINS as f64 {
        return Err(AepError::validation(format!(
            "wind speed span {lo}..{hi} needs more than {MAX_REGRID_BINS} bins of width {width}"
        )));
    }
    let count = (count as usize).max(1);
    let mut edges: Vec<f64> = (0..=count).map(|j| lo + j as f64 * width).collect();
    // snapping may leave the last edge a hair short of `hi`
    if let Some(last) = edges.last_mut() {
        *last = last.max(hi);
    }
    Ok(edges)
}

/// Builds uniform edges whose bins are centred on `centre + k * width` and
/// together cover `lo..hi`.
///
/// The grid is extended below `centre` by whole bins until it reaches `lo`,
/// so a source centre always coincides with a destination centre.
///
/// # Errors
///
/// Same as [`uniform_edges`].
pub fn centred_edges(centre: f64, lo: f64, hi: f64, width: f64) -> Result<Vec<f64>, AepError> {
    let anchor = centre - width / 2.0;
    let below = steps_to_cover(anchor - lo, width);
    if !below.is_finite() || below > MAX_REGRID_BINS as f64 {
        return Err(AepError::validation(format!(
            "wind speed span {lo}..{hi} needs more than {MAX_REGRID_BINS} bins of width {width}"
        )));
    }
    uniform_edges(anchor - below * width, hi, width)
}

/// Redistributes `values` defined on `src_edges` onto `dst_edges`.
///
/// Both edge slices must be ascending; `src_edges.len() == values.len() + 1`.
/// Runs in `O(src + dst)` with a two-pointer sweep over the edges.
///
/// # Returns
///
/// One value per destination bin (`dst_edges.len() - 1` entries).
pub fn rebin(src_edges: &[f64], values: &[f64], dst_edges: &[f64]) -> Vec<f64> {
    debug_assert_eq!(src_edges.len(), values.len() + 1);
    let n_src = values.len();
    let n_dst = dst_edges.len().saturating_sub(1);
    let mut out = vec![0.0; n_dst];

    let (mut i, mut j) = (0usize, 0usize);
    while i < n_src && j < n_dst {
        let (s_lo, s_hi) = (src_edges[i], src_edges[i + 1]);
        let (d_lo, d_hi) = (dst_edges[j], dst_edges[j + 1]);

        let overlap = s_hi.min(d_hi) - s_lo.max(d_lo);
        let width = s_hi - s_lo;
        if overlap > 0.0 && width > 0.0 {
            out[j] += values[i] * overlap / width;
        }

        if s_hi <= d_hi {
            i += 1;
        } else {
            j += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn uniform_edges_exact_multiple() {
        let e = uniform_edges(3.5, 6.5, 0.5).unwrap();
        assert_eq!(e, vec![3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5]);
    }

    #[test]
    fn uniform_edges_partial_last_bin() {
        let e = uniform_edges(0.0, 1.2, 0.5).unwrap();
        assert_eq!(e.len(), 4);
        assert!(e[3] >= 1.2);
    }

    #[test]
    fn uniform_edges_zero_span_has_one_bin() {
        let e = uniform_edges(2.0, 2.0, 0.5).unwrap();
        assert_eq!(e, vec![2.0, 2.5]);
    }

    #[test]
    fn centred_edges_put_a_bin_on_the_centre() {
        // integer source centres 4, 5, 6 span 3.5..6.5
        let e = centred_edges(4.0, 3.5, 6.5, 0.5).unwrap();
        assert_eq!(e, vec![3.25, 3.75, 4.25, 4.75, 5.25, 5.75, 6.25, 6.75]);
    }

    #[test]
    fn centred_edges_match_uniform_when_aligned() {
        let e = centred_edges(0.5, 0.25, 2.25, 0.5).unwrap();
        assert_eq!(e, uniform_edges(0.25, 2.25, 0.5).unwrap());
    }

    #[test]
    fn oversized_span_rejected() {
        assert!(matches!(
            uniform_edges(0.0, 1e300, 0.5),
            Err(AepError::Validation(_))
        ));
        assert!(matches!(
            uniform_edges(0.0, f64::INFINITY, 0.5),
            Err(AepError::Validation(_))
        ));
        assert!(matches!(
            centred_edges(1e300, -1e300, 1e300, 0.5),
            Err(AepError::Validation(_))
        ));
    }

    #[test]
    fn splits_source_bin_by_overlap() {
        let out = rebin(&[0.0, 1.0], &[1.0], &[0.0, 0.25, 1.0]);
        assert!(close(out[0], 0.25));
        assert!(close(out[1], 0.75));
    }

    #[test]
    fn merges_source_bins_into_wider_destination() {
        let out = rebin(&[0.0, 0.5, 1.0, 1.5], &[0.1, 0.2, 0.3], &[0.0, 1.5]);
        assert_eq!(out.len(), 1);
        assert!(close(out[0], 0.6));
    }

    #[test]
    fn destination_beyond_source_gets_partial_mass() {
        let out = rebin(&[0.0, 1.0], &[1.0], &[0.0, 0.5, 1.0, 1.5]);
        assert!(close(out[0], 0.5));
        assert!(close(out[1], 0.5));
        assert!(close(out[2], 0.0));
    }

    #[test]
    fn conserves_mass_for_non_uniform_source() {
        let src = [0.0, 0.3, 1.1, 1.2, 2.9];
        let vals = [0.05, 0.4, 0.15, 0.4];
        let dst = uniform_edges(0.0, 2.9, 0.5).unwrap();
        let out = rebin(&src, &vals, &dst);
        let total: f64 = out.iter().sum();
        assert!(close(total, 1.0));
    }
}
