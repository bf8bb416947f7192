//! Voucher rendering collaborator contract.
//!
//! The core hands a [`Voucher`] record to a renderer and has no dependency
//! on the artifact format; the real application renders a PDF.

use domain::models::Voucher;

/// Produces a downloadable artifact from a voucher record.
pub trait VoucherRenderer: Send + Sync {
    fn render(&self, voucher: &Voucher) -> Vec<u8>;
}

/// Minimal text rendering, used by the demo binary.
#[derive(Debug, Default)]
pub struct PlainTextRenderer;

impl VoucherRenderer for PlainTextRenderer {
    fn render(&self, voucher: &Voucher) -> Vec<u8> {
        format!(
            "RecycleHub voucher {number}\n\
             Value: {value} DH\n\
             Points spent: {points}\n\
             Beneficiary: {beneficiary}\n\
             Issued: {issued}\n\
             Expires: {expires}\n",
            number = voucher.number,
            value = voucher.value,
            points = voucher.points_spent,
            beneficiary = voucher.beneficiary,
            issued = voucher.issued_at.format("%Y-%m-%d"),
            expires = voucher.expires_at.format("%Y-%m-%d"),
        )
        .into_bytes()
    }
}
