//! DART endpoint names and the summary section tables built on them.

/// Disclosure search.
pub const DISCLOSURE_LIST: &str = "list";

/// Full single-company financial statement.
pub const FINANCIAL_STATEMENT: &str = "fnlttSinglAcntAll";

/// Zipped corporation code registry.
pub const CORP_CODE_ARCHIVE: &str = "corpCode.xml";

/// File name of the registry inside the archive.
pub const CORP_CODE_ENTRY: &str = "CORPCODE.xml";

/// Base of the public disclosure viewer.
pub const VIEWER_URL: &str = "https://dart.fss.or.kr/dsaf001/main.do";

/// Extra reshaping a summary section needs beyond base normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    Rows,
    /// Group by business segment and gender.
    Employees,
    /// Add Korean labels for gender, registration and full-time flags.
    Executives,
}

/// One regular-report endpoint contributing a key to a summary.
#[derive(Debug, Clone, Copy)]
pub struct SummarySection {
    pub key: &'static str,
    pub endpoint: &'static str,
    pub drop_fields: &'static [&'static str],
    pub shape: SectionShape,
}

impl SummarySection {
    const fn rows(key: &'static str, endpoint: &'static str) -> Self {
        Self {
            key,
            endpoint,
            drop_fields: &[],
            shape: SectionShape::Rows,
        }
    }
}

pub const DEBT_SECTIONS: &[SummarySection] = &[
    SummarySection::rows("corporate_bonds_outstanding", "cprndNrdmpBlce"),
    SummarySection::rows("commercial_paper_outstanding", "entrprsBilScritsNrdmpBlce"),
    SummarySection::rows(
        "contingent_capital_securities_outstanding",
        "cndlCaplScritsNrdmpBlce",
    ),
    SummarySection::rows("new_capital_securities_outstanding", "newCaplScritsNrdmpBlce"),
    SummarySection::rows("short_term_bonds_outstanding", "srtpdPsndbtNrdmpBlce"),
    SummarySection::rows("debt_securities_issuance", "detScritsIsuAcmslt"),
];

pub const INVESTMENT_SECTIONS: &[SummarySection] = &[
    SummarySection::rows("investments_in_other_corporations", "otrCprInvstmntSttus"),
    SummarySection {
        key: "private_placement_fund_usage",
        endpoint: "prvsrpCptalUseDtls",
        drop_fields: &["cptal_use_plan", "real_cptal_use_sttus"],
        shape: SectionShape::Rows,
    },
    SummarySection {
        key: "public_offering_fund_usage",
        endpoint: "pssrpCptalUseDtls",
        drop_fields: &["on_dclrt_cptal_use_plan", "real_cptal_use_sttus"],
        shape: SectionShape::Rows,
    },
];

pub const PEOPLE_SECTIONS: &[SummarySection] = &[
    SummarySection {
        key: "employees",
        endpoint: "empSttus",
        drop_fields: &[
            "sexdstn",
            "reform_bfe_emp_co_rgllbr",
            "reform_bfe_emp_co_cnttk",
            "reform_bfe_emp_co_etc",
        ],
        shape: SectionShape::Employees,
    },
    SummarySection {
        key: "executives",
        endpoint: "exctvSttus",
        drop_fields: &["sexdstn", "rgist_exctv_at", "fte_at"],
        shape: SectionShape::Executives,
    },
    SummarySection::rows("director_auditor_compensation", "hmvAuditAllSttus"),
    SummarySection::rows("unregistered_executive_compensation", "unrstExctvMendngSttus"),
    SummarySection::rows("outside_directors", "outcmpnyDrctrNdChangeSttus"),
    SummarySection::rows("top_five_compensation", "indvdlByPay"),
];

pub const STOCK_SECTIONS: &[SummarySection] = &[
    SummarySection::rows("largest_shareholders", "hyslrSttus"),
    SummarySection::rows("largest_shareholder_changes", "hyslrChgSttus"),
    SummarySection::rows("minority_shareholders", "mrhlSttus"),
    SummarySection::rows("dividends", "alotMatter"),
    SummarySection::rows("capital_changes", "irdsSttus"),
    SummarySection::rows("treasury_stock", "tesstkAcqsDspsSttus"),
];
