use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::period::{parse_date, resolve_month, resolve_range, resolve_week};
use crate::core::tenant_context::resolve_report_tenant;
use crate::core::{AppError, Principal, ReportPeriod, Role};
use crate::modules::reports::models::TrendDensity;
use crate::modules::reports::services::ReportAssembler;

/// Query parameters shared by every report route
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Tenant override, honored for super admins only
    #[serde(default)]
    pub business_id: Option<i64>,
    /// Reference date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    /// YYYY-MM
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Zero-fill trend dates without activity
    #[serde(default)]
    pub fill_gaps: Option<bool>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

impl ReportQuery {
    fn range(&self) -> crate::core::Result<ReportPeriod> {
        resolve_range(self.start_date.as_deref(), self.end_date.as_deref())
    }

    /// `startDate`/`endDate` when either is given, otherwise the single `date`
    fn day_or_range(&self) -> crate::core::Result<ReportPeriod> {
        if self.start_date.is_some() || self.end_date.is_some() {
            self.range()
        } else {
            parse_date("date", self.date.as_deref()).map(ReportPeriod::day)
        }
    }

    fn density(&self) -> TrendDensity {
        TrendDensity::from_fill_gaps(self.fill_gaps)
    }
}

/// Role gate plus effective tenant for a scoped report
fn scoped_tenant(principal: &Principal, query: &ReportQuery) -> crate::core::Result<i64> {
    principal.require_role(Role::REPORT_VIEWERS)?;
    resolve_report_tenant(principal, query.business_id)
}

/// GET /reports/weekly?date=YYYY-MM-DD
pub async fn weekly_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = resolve_week(query.date.as_deref())?;

    Ok(HttpResponse::Ok().json(assembler.weekly(business_id, period).await?))
}

/// GET /reports/monthly?month=YYYY-MM
pub async fn monthly_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = resolve_month(query.month.as_deref())?;

    Ok(HttpResponse::Ok().json(assembler.monthly(business_id, period).await?))
}

/// GET /reports/daily?date=YYYY-MM-DD or ?startDate=..&endDate=..
pub async fn daily_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.day_or_range()?;

    Ok(HttpResponse::Ok().json(assembler.daily(business_id, period).await?))
}

/// GET /reports/product-profitability?startDate=..&endDate=..
pub async fn product_profitability_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .product_profitability(business_id, period)
            .await?,
    ))
}

/// GET /reports/daily-trend?startDate=..&endDate=..[&fillGaps=true]
pub async fn daily_trend_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .daily_trend(business_id, period, query.density())
            .await?,
    ))
}

/// GET /reports/most-profitable?startDate=..&endDate=..
pub async fn most_profitable_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(assembler.most_profitable(business_id, period).await?))
}

/// GET /reports/detailed/weekly
pub async fn detailed_weekly_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = resolve_week(query.date.as_deref())?;

    Ok(HttpResponse::Ok().json(
        assembler
            .detailed_weekly(business_id, period, query.density())
            .await?,
    ))
}

/// GET /reports/detailed/monthly
pub async fn detailed_monthly_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = resolve_month(query.month.as_deref())?;

    Ok(HttpResponse::Ok().json(
        assembler
            .detailed_monthly(business_id, period, query.density())
            .await?,
    ))
}

/// GET /reports/detailed/product-profitability
pub async fn detailed_product_profitability_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .detailed_product_profitability(business_id, period)
            .await?,
    ))
}

/// GET /reports/detailed/daily-trend
pub async fn detailed_daily_trend_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .detailed_daily_trend(business_id, period, query.density())
            .await?,
    ))
}

/// GET /reports/detailed/most-profitable
pub async fn detailed_most_profitable_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let business_id = scoped_tenant(&principal, &query)?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .detailed_most_profitable(business_id, period)
            .await?,
    ))
}

/// GET /reports/admin/global-summary
///
/// Cross-tenant; `businessId` has no meaning here and is ignored.
pub async fn global_summary_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    principal.require_privileged()?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(assembler.global_summary(period).await?))
}

/// GET /reports/admin/ranking?startDate=..&endDate=..[&maxResults=10]
pub async fn business_ranking_report(
    assembler: web::Data<ReportAssembler>,
    principal: Principal,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    principal.require_privileged()?;
    let period = query.range()?;

    Ok(HttpResponse::Ok().json(
        assembler
            .business_ranking(period, query.max_results)
            .await?,
    ))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/weekly", web::get().to(weekly_report))
            .route("/monthly", web::get().to(monthly_report))
            .route("/daily", web::get().to(daily_report))
            .route(
                "/product-profitability",
                web::get().to(product_profitability_report),
            )
            .route("/daily-trend", web::get().to(daily_trend_report))
            .route("/most-profitable", web::get().to(most_profitable_report))
            .service(
                web::scope("/detailed")
                    .route("/weekly", web::get().to(detailed_weekly_report))
                    .route("/monthly", web::get().to(detailed_monthly_report))
                    .route(
                        "/product-profitability",
                        web::get().to(detailed_product_profitability_report),
                    )
                    .route("/daily-trend", web::get().to(detailed_daily_trend_report))
                    .route(
                        "/most-profitable",
                        web::get().to(detailed_most_profitable_report),
                    ),
            )
            .service(
                web::scope("/admin")
                    .route("/global-summary", web::get().to(global_summary_report))
                    .route("/ranking", web::get().to(business_ranking_report)),
            ),
    );
}
