//! Verification QR codes
//!
//! The token returned by `owner-verifications/{id}/token` is encoded as-is
//! and rendered to a standalone SVG document.

use qrcode::QrCode;
use qrcode::render::svg;

use crate::error::{ClientError, ClientResult};

/// Minimum rendered size, in pixels
pub const QR_MIN_SIZE: u32 = 240;

/// Render a verification token as an SVG QR code
pub fn verification_qr_svg(token: &str) -> ClientResult<String> {
    if token.trim().is_empty() {
        return Err(ClientError::Qr("empty token".to_string()));
    }
    let code = QrCode::new(token.as_bytes()).map_err(|e| ClientError::Qr(e.to_string()))?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .dark_color(svg::Color("#0f172a"))
        .light_color(svg::Color("#ffffff"))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_renders_svg() {
        let svg = verification_qr_svg("vrf_9f8e7d6c").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#0f172a"));
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = verification_qr_svg("  ").unwrap_err();
        assert!(matches!(err, ClientError::Qr(_)));
    }
}
