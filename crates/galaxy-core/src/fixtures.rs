//! Canned response payloads, one per built-in intent.
//!
//! Values are precomputed sample data; nothing here is derived from the query.

use galaxy_schema::{
    CanvasDetail, Chart, ChartSeries, DataTableRow, Intent, Response, ResponseActions,
    Severity::{self, Critical as C, Normal as N, Warning as W},
};

fn analysis(
    intent: Intent,
    text: &str,
    chart: Chart,
    canvas: Option<(&str, &str, Vec<DataTableRow>, Option<&str>)>,
) -> Response {
    let canvas = canvas.map(|(title, description, data_table, info)| CanvasDetail {
        title: title.to_string(),
        description: description.to_string(),
        chart: chart.clone(),
        data_table,
        additional_info: info.map(str::to_string),
    });
    Response {
        intent,
        text: text.to_string(),
        chart: Some(chart),
        canvas,
        actions: ResponseActions::all(),
    }
}

fn single(title: &str, labels: &[&str], series: &str, data: &[f64], sev: &[Severity]) -> Chart {
    Chart::new(title, labels).with_series(ChartSeries::new(series, data, sev))
}

fn row(technician: &str, batch_id: &str, moisture: &str, status: &str) -> DataTableRow {
    DataTableRow::new(technician, batch_id, moisture, status)
}

pub fn moisture_risk_trend() -> Response {
    let chart = single(
        "Batch 410 Moisture Trend",
        &["8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM"],
        "Moisture Level (%)",
        &[12.5, 11.8, 11.2, 10.8, 10.4, 10.1],
        &[N, N, W, W, C, C],
    );
    analysis(
        Intent::MoistureRiskTrend,
        "⚠️ Warning: Batch 410 is showing a concerning downward trend in moisture levels. \
         Current reading is 10.1%, approaching the critical threshold of 10.0%. The dryer \
         temperature has been running 2.5°C above the optimal range for the last 2 hours.\n\n\
         Recommended Actions:\n\
         1. Reduce dryer temperature by 2.5°C\n\
         2. Increase moisture sampling frequency to 15-minute intervals\n\
         3. Alert production supervisor for immediate review",
        chart,
        Some((
            "Moisture Risk Analysis",
            "Analysis based on real-time dryer telemetry and moisture sensor data. Historical \
             data shows that similar moisture decline patterns led to out-of-spec products in \
             78% of cases if not addressed within 1 hour.",
            vec![
                row("John K.", "Batch 410", "10.1%", "At Risk"),
                row("Lisa D.", "Batch 409", "12.3%", "Normal"),
                row("Ana R.", "Batch 408", "11.9%", "Normal"),
                row("Mike P.", "Batch 407", "12.1%", "Normal"),
            ],
            Some("Equipment: Dryer-A1 | Product: Chickpea Flour | Target Moisture: 12.0% ±1.5%"),
        )),
    )
}

pub fn failure_pattern() -> Response {
    let chart = single(
        "Process Parameter Trend",
        &["Batch 401", "Batch 402", "Batch 403", "Batch 404", "Batch 405", "Current"],
        "Process Parameters",
        &[85.0, 87.0, 89.0, 92.0, 94.0, 93.0],
        &[N, N, W, C, C, W],
    );
    analysis(
        Intent::FailurePattern,
        "🚨 Alert: Current process parameters are showing similarities to a pattern that led \
         to QC failures in Batches 404 and 405.\n\n\
         Key Observations:\n\
         1. Rising pressure trend over last 3 batches\n\
         2. Temperature variance increased by 15%\n\
         3. Current parameters match 89% with previous failure pattern\n\n\
         Recommended Actions:\n\
         1. Adjust pressure to 85-87% range\n\
         2. Verify temperature control system\n\
         3. Increase sampling frequency",
        chart,
        Some((
            "QC Failure Pattern Analysis",
            "Pattern recognition analysis comparing current process parameters with historical \
             QC failure data. The system has identified a significant correlation with previous \
             failure cases.",
            vec![
                row("System", "Current", "93%", "Warning"),
                row("Lisa D.", "Batch 405", "94%", "Failed"),
                row("John K.", "Batch 404", "92%", "Failed"),
                row("Ana R.", "Batch 403", "89%", "Warning"),
            ],
            None,
        )),
    )
}

pub fn ash_content() -> Response {
    let chart = single(
        "Ash Content by Process Condition",
        &["Low Temp", "High Temp", "Low Press", "High Press", "Long Time", "Short Time"],
        "Ash Content (%)",
        &[0.45, 0.68, 0.52, 0.72, 0.58, 0.49],
        &[N, C, N, C, W, N],
    );
    analysis(
        Intent::AshContent,
        "Analysis of historical data shows two main process conditions that consistently \
         result in ash content above 0.6%:\n\n\
         1. High Temperature Processing (>180°C)\n\
         - Avg ash content: 0.68%\n\
         - Occurrence rate: 82% of high-temp runs\n\n\
         2. High Pressure Operations (>2.4 bar)\n\
         - Avg ash content: 0.72%\n\
         - Occurrence rate: 75% of high-pressure runs\n\n\
         Recommended Process Parameters:\n\
         - Temperature: 165-175°C\n\
         - Pressure: 1.8-2.2 bar\n\
         - Processing time: 45-50 minutes",
        chart,
        Some((
            "Ash Content Analysis",
            "Comprehensive analysis of process conditions and their impact on ash content. Data \
             collected from 1,200+ production runs over the last 6 months.",
            Vec::new(),
            None,
        )),
    )
}

pub fn fermentation_correlation() -> Response {
    let labels = ["6:00 AM", "8:00 AM", "10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM"];
    let chart = Chart::new("pH vs Pressure Correlation", &labels)
        .with_series(ChartSeries::uniform(
            "pH Level",
            &[6.8, 6.5, 6.2, 5.8, 5.5, 5.2],
            N,
        ))
        .with_series(ChartSeries::uniform(
            "Tank Pressure (bar)",
            &[1.2, 1.5, 1.8, 2.1, 2.4, 2.7],
            W,
        ));
    analysis(
        Intent::FermentationCorrelation,
        "Analysis reveals a strong negative correlation (-0.92) between pH levels and \
         fermentation tank pressure:\n\n\
         1. pH Trend:\n\
         - Starting pH: 6.8 (optimal)\n\
         - Current pH: 5.2 (below target)\n\
         - Rate of change: -0.27 pH/hour\n\n\
         2. Pressure Impact:\n\
         - Pressure increase correlates with pH decrease\n\
         - Critical threshold at 2.4 bar\n\
         - Current trend suggests process adjustment needed within 2 hours\n\n\
         Recommended Actions:\n\
         1. Reduce tank pressure to 1.8 bar\n\
         2. Add buffer solution if pH drops below 5.0\n\
         3. Increase ventilation cycle frequency",
        chart,
        Some((
            "Fermentation Analysis",
            "Real-time correlation analysis between pH levels and tank pressure during \
             fermentation. Data shows a significant inverse relationship that may affect \
             product quality.",
            Vec::new(),
            None,
        )),
    )
}

pub fn line_failure_distribution() -> Response {
    let chart = single(
        "QC Failure Distribution",
        &["Moisture", "Protein", "Particle Size", "Color", "Ash Content", "Microbial"],
        "Failure Rate (%)",
        &[45.0, 15.0, 30.0, 10.0, 25.0, 5.0],
        &[C, N, W, N, W, N],
    );
    analysis(
        Intent::LineFailureDistribution,
        "Analysis of Chickpea Line A's increased QC failures yesterday reveals:\n\n\
         1. Primary Issue: Moisture Content\n\
         - 45% of failures due to high moisture\n\
         - Average: 14.0% (Target: 12.0% ±1.0%)\n\
         - Affected batches: CKP-A-021 through 023\n\n\
         2. Contributing Factors:\n\
         - Dryer temperature fluctuation (±5°C)\n\
         - Ambient humidity spike (78% RH)\n\
         - Recent maintenance on moisture sensors\n\n\
         Recommended Actions:\n\
         1. Recalibrate dryer temperature controls\n\
         2. Verify moisture sensor accuracy\n\
         3. Adjust drying time by +15 minutes\n\
         4. Review maintenance procedures",
        chart,
        Some((
            "Chickpea Line A Analysis",
            "Detailed analysis of QC failures in Chickpea Line A, showing distribution of \
             failure types and related process parameters. Data from the last 24 hours of \
             production.",
            vec![
                row("Lisa D.", "CKP-A-023", "14.2%", "Failed"),
                row("John K.", "CKP-A-022", "13.8%", "Failed"),
                row("Ana R.", "CKP-A-021", "13.9%", "Failed"),
                row("Mike P.", "CKP-A-020", "12.1%", "Passed"),
            ],
            None,
        )),
    )
}

pub fn notebook_summary() -> Response {
    let chart = Chart::new(
        "Lab Temperature Log",
        &["8:00 AM", "10:00 AM", "12:00 PM", "2:00 PM", "4:00 PM", "6:00 PM"],
    )
    .with_series(ChartSeries::uniform(
        "Sample Temperature (°C)",
        &[22.1, 22.3, 22.8, 22.4, 22.2, 22.1],
        N,
    ));
    analysis(
        Intent::NotebookSummary,
        "📝 Summary of Lisa D's ELN entries for May 12:\n\n\
         1. Morning Shift (8:00 AM - 12:00 PM):\n\
         - Calibrated moisture analyzer (ID: MA-103)\n\
         - Processed batches GPC-052301 and GPC-052302\n\
         - Noted slight temperature fluctuation in Lab Room 2\n\n\
         2. Afternoon Shift (1:00 PM - 6:00 PM):\n\
         - Completed protein analysis for previous day's samples\n\
         - Started microbial testing for Batch GPC-052303\n\
         - Equipment maintenance on pH meter PM-201\n\n\
         3. Key Observations:\n\
         - All moisture readings within specification (11.5% - 12.5%)\n\
         - Temperature maintained at 22.3°C ± 0.5°C\n\
         - No equipment issues reported\n\n\
         4. Pending Tasks:\n\
         - Complete analysis of Batch GPC-052304\n\
         - Update calibration records\n\
         - Handover notes for night shift",
        chart,
        Some((
            "ELN Analysis - May 12",
            "Comprehensive summary of Electronic Lab Notebook entries by Lisa D. on May 12. \
             Includes temperature monitoring, sample analysis, and equipment maintenance \
             records.",
            vec![
                row("Lisa D.", "GPC-052301", "11.8%", "Completed"),
                row("Lisa D.", "GPC-052302", "12.1%", "Completed"),
                row("Lisa D.", "GPC-052303", "11.9%", "Completed"),
                row("Lisa D.", "GPC-052304", "12.2%", "In Progress"),
            ],
            None,
        )),
    )
}

/// Text-only: the rewritten note has no chart or canvas.
pub fn note_rewrite() -> Response {
    Response {
        actions: ResponseActions::all(),
        ..Response::text_only(
            Intent::NoteRewrite,
            "📋 Original Note:\n\
             \"Found irreg. readings w/ B-412, poss. contamination? Temp ok but moist. high @ \
             14.2%. Rerun needed + check cal. Informed JS.\"\n\n\
             ✍️ Clarified Version:\n\n\
             Date: May 15, 2023\n\
             Time: 14:30\n\
             Technician: Lisa D.\n\
             Batch: B-412\n\n\
             Observations:\n\
             1. Irregular readings detected during routine analysis\n\
             2. Moisture content measured at 14.2% (Above specification: 10.5% - 12.5%)\n\
             3. Temperature within normal range: 22.1°C\n\n\
             Potential Issue:\n\
             - Possible sample contamination affecting readings\n\n\
             Actions Taken:\n\
             1. Flagged batch for reanalysis\n\
             2. Initiated calibration check on moisture analyzer\n\
             3. Notified John Smith (Shift Supervisor)\n\n\
             Next Steps:\n\
             1. Rerun analysis with fresh sample\n\
             2. Verify equipment calibration\n\
             3. Document follow-up results\n\n\
             Status: Pending Resolution",
        )
    }
}

pub fn root_cause() -> Response {
    let chart = single(
        "Failure Root Causes",
        &["Equipment", "Process", "Material", "Human", "Environment", "Method"],
        "Frequency",
        &[35.0, 25.0, 20.0, 10.0, 5.0, 5.0],
        &[C, W, N, N, N, N],
    );
    analysis(
        Intent::RootCause,
        "📊 Key Observations from Failed Batch ELN Entries (Last 30 Days):\n\n\
         1. Equipment-Related (35%):\n\
         - Moisture analyzer calibration drift\n\
         - Temperature sensor malfunction\n\
         - Inconsistent readings between devices\n\n\
         2. Process Deviations (25%):\n\
         - Drying time variations\n\
         - Temperature control issues\n\
         - Mixing speed inconsistencies\n\n\
         3. Material Quality (20%):\n\
         - Inconsistent raw material moisture\n\
         - Particle size variations\n\
         - Storage condition deviations\n\n\
         4. Common Technician Notes:\n\
         - \"Equipment readings unstable\"\n\
         - \"Sample heterogeneity observed\"\n\
         - \"Process parameters fluctuating\"\n\n\
         5. Corrective Actions Documented:\n\
         - Equipment maintenance schedule updated\n\
         - Process parameters tightened\n\
         - Material handling procedures revised",
        chart,
        Some((
            "Failed Batch Analysis",
            "Analysis of Electronic Lab Notebook entries for failed batches over the last 30 \
             days. Data categorized by root cause and frequency of occurrence.",
            vec![
                row("Various", "Multiple", "N/A", "Equipment Issue"),
                row("Various", "Multiple", "N/A", "Process Deviation"),
                row("Various", "Multiple", "N/A", "Material Quality"),
                row("Various", "Multiple", "N/A", "Human Error"),
            ],
            None,
        )),
    )
}

pub fn soy_trend() -> Response {
    let chart = Chart::new(
        "Daily QC Failures",
        &["Mon", "Tue", "Wed", "Thu", "Fri", "Today"],
    )
    .with_series(ChartSeries::uniform(
        "QC Failures",
        &[2.0, 1.0, 3.0, 4.0, 2.0, 3.0],
        C,
    ));
    analysis(
        Intent::SoyTrend,
        "📝 Recent Technician Notes on Soy QC Failures:\n\n\
         1. Most Recent Observations:\n\
         - Mike P. (Today): \"Moisture consistently high despite extended drying time. Dryer \
         temperature verified, possible sensor issue.\"\n\
         - Lisa D. (Yesterday): \"Raw material moisture above usual range. Supplier \
         notification recommended.\"\n\
         - John K. (2 days ago): \"Multiple samples showing elevated moisture. Environmental \
         humidity may be factor.\"\n\n\
         2. Common Themes in Notes:\n\
         - Elevated moisture levels (13.5-13.9%)\n\
         - Drying process inconsistencies\n\
         - Equipment performance concerns\n\n\
         3. Documented Actions:\n\
         - Equipment maintenance requested\n\
         - Supplier quality alert issued\n\
         - Process parameters under review\n\n\
         4. Recommendations from Notes:\n\
         - Calibrate all moisture sensors\n\
         - Review supplier specifications\n\
         - Adjust drying parameters",
        chart,
        Some((
            "Soy QC Analysis",
            "Analysis of technician notes and observations regarding recent soy QC failures. \
             Includes trending data and specific batch information.",
            vec![
                row("Mike P.", "SOY-0531", "13.8%", "Failed - High Moisture"),
                row("Lisa D.", "SOY-0530", "13.5%", "Failed - High Moisture"),
                row("John K.", "SOY-0529", "13.9%", "Failed - High Moisture"),
                row("Ana R.", "SOY-0528", "12.2%", "Passed"),
            ],
            None,
        )),
    )
}

pub fn ph_distribution() -> Response {
    let chart = single(
        "pH Distribution in Borderline Cases",
        &["5.8-5.9", "6.0-6.1", "6.2-6.3", "7.8-7.9", "8.0-8.1", "8.2-8.3"],
        "Frequency",
        &[8.0, 12.0, 5.0, 6.0, 10.0, 7.0],
        &[W, W, N, N, W, W],
    );
    analysis(
        Intent::PhDistribution,
        "📊 Analysis of Comments on Borderline pH Results:\n\n\
         1. Lower pH Range (5.8-6.1):\n\
         - \"Buffer solution may need replacement\"\n\
         - \"Calibration check recommended\"\n\
         - \"Sample temperature effect observed\"\n\n\
         2. Upper pH Range (8.0-8.3):\n\
         - \"Possible contamination from cleaning process\"\n\
         - \"Storage time may be affecting readings\"\n\
         - \"Environmental factors noted\"\n\n\
         3. Common Observations:\n\
         - Equipment calibration status\n\
         - Temperature variations\n\
         - Sample handling procedures\n\n\
         4. Technician Recommendations:\n\
         - Increase calibration frequency\n\
         - Review sample preparation method\n\
         - Document environmental conditions\n\n\
         5. Quality Impact Notes:\n\
         - Product stability concerns\n\
         - Processing adjustments needed\n\
         - Additional verification required",
        chart,
        Some((
            "pH Analysis",
            "Comprehensive analysis of technician comments regarding borderline pH results. \
             Data shows distribution of pH values and frequency of occurrence.",
            Vec::new(),
            None,
        )),
    )
}
