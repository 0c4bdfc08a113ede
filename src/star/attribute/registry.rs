//! Identifier → prototype table and the attribute reader.

use std::collections::BTreeMap;

use tracing::debug;

use super::ids::*;
use super::legacy;
use super::types::{Attribute, AttributeKind, AttributeValue, Prototype, Scope};
use crate::common::{Error, RGBColor, Result};
use crate::star::document::DocumentContext;
use crate::star::zone::StarZone;

/// Immutable map from attribute identifier to prototype.
///
/// Build it once with [`AttributeRegistry::new`] and share it by reference;
/// tests can start from [`AttributeRegistry::empty`] instead.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    prototypes: BTreeMap<u32, Prototype>,
}

impl AttributeRegistry {
    /// Registry holding every standard attribute.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.init_char();
        registry.init_paragraph();
        registry.init_frame();
        registry.init_graphic();
        registry.init_cell();
        registry.init_page();
        registry.init_edit_engine();
        registry.init_chart();
        registry.init_form_text();
        registry.init_sdr();
        registry.init_3d_object();
        registry.init_3d_scene();
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Register `prototype`, returning the one previously stored under its
    /// identifier.
    pub fn register(&mut self, prototype: Prototype) -> Option<Prototype> {
        self.prototypes.insert(prototype.which(), prototype)
    }

    /// Register `first..=last`; `make` receives each identifier and its index
    /// in the range.
    pub fn register_range(
        &mut self,
        first: u32,
        last: u32,
        mut make: impl FnMut(u32, u32) -> Prototype,
    ) {
        for which in first..=last {
            self.register(make(which, which - first));
        }
    }

    pub fn get(&self, which: u32) -> Option<&Prototype> {
        self.prototypes.get(&which)
    }

    pub fn contains(&self, which: u32) -> bool {
        self.prototypes.contains_key(&which)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Registered identifiers in increasing order.
    pub fn identifiers(&self) -> impl Iterator<Item = u32> + '_ {
        self.prototypes.keys().copied()
    }

    /// A fresh default-valued attribute, or a dummy when `which` is unknown.
    pub fn default_attribute(&self, which: u32) -> Attribute {
        match self.prototypes.get(&which) {
            Some(prototype) => prototype.create(),
            None => Attribute::dummy(which),
        }
    }

    /// Read attribute `which` written with `version`, ending at `last_pos`.
    ///
    /// A registered identifier that fails to decode, or that reads past
    /// `last_pos`, yields `None`. An unregistered identifier goes through the
    /// legacy layouts and always yields an attribute, a dummy when the layout
    /// is unknown. The caller realigns the cursor.
    pub fn read_instance(
        &self,
        zone: &mut StarZone,
        which: u32,
        version: u16,
        last_pos: usize,
        doc: &mut dyn DocumentContext,
    ) -> Option<Attribute> {
        let Some(prototype) = self.prototypes.get(&which) else {
            return Some(legacy::read(zone, which, version, last_pos, doc));
        };
        let pos = zone.tell();
        let label = zone.label("StarAttribute");
        match read_value(prototype, zone, last_pos, doc) {
            Ok(value) if zone.tell() <= last_pos => {
                if &value != prototype.default_value() {
                    zone.note(pos, format!("{label}{}={value},", prototype.name()));
                }
                let mut attribute = prototype.create();
                attribute.set_value(value);
                Some(attribute)
            },
            Ok(_) => {
                zone.error(pos, format!("{label}{}: read too much,", prototype.name()));
                None
            },
            Err(err) => {
                debug!(which, "can not read attribute: {err}");
                zone.error(pos, format!("{label}{}:###bad,", prototype.name()));
                None
            },
        }
    }

    fn init_char(&mut self) {
        let f = Scope::FONT;
        self.register(Prototype::uint(CHR_CASEMAP, "chrCaseMap", 1, 0, f));
        self.register(Prototype::color(CHR_COLOR, "chrColor", RGBColor::BLACK, f));
        self.register(Prototype::boolean(CHR_CONTOUR, "chrContour", false, f));
        self.register(Prototype::uint(CHR_CROSSEDOUT, "chrCrossedOut", 1, 0, f));
        self.register(Prototype::int(CHR_KERNING, "chrKerning", 2, 0, f));
        self.register(Prototype::uint(CHR_LANGUAGE, "chrLanguage", 2, 0x3FF, f));
        self.register(Prototype::uint(CHR_POSTURE, "chrPosture", 1, 0, f));
        self.register(Prototype::boolean(CHR_SHADOWED, "chrShadowed", false, f));
        self.register(Prototype::uint(CHR_UNDERLINE, "chrUnderline", 1, 0, f));
        self.register(Prototype::uint(CHR_WEIGHT, "chrWeight", 1, 5, f));
        self.register(Prototype::boolean(CHR_WORDLINEMODE, "chrWordLineMode", false, f));
        self.register(Prototype::boolean(CHR_AUTOKERN, "chrAutoKern", false, f));
        self.register(Prototype::boolean(CHR_BLINK, "chrBlink", false, f));
        self.register(Prototype::boolean(CHR_NOHYPHEN, "chrNoHyphen", true, f));
        self.register(Prototype::boolean(CHR_NOLINEBREAK, "chrNoLineBreak", true, f));
        self.register(Prototype::uint(CHR_CJK_LANGUAGE, "chrCJKLanguage", 2, 0x3FF, f));
        self.register(Prototype::uint(CHR_CJK_POSTURE, "chrCJKPosture", 1, 0, f));
        self.register(Prototype::uint(CHR_CJK_WEIGHT, "chrCJKWeight", 1, 5, f));
        self.register(Prototype::uint(CHR_CTL_LANGUAGE, "chrCTLLanguage", 2, 0x3FF, f));
        self.register(Prototype::uint(CHR_CTL_POSTURE, "chrCTLPosture", 1, 0, f));
        self.register(Prototype::uint(CHR_CTL_WEIGHT, "chrCTLWeight", 1, 5, f));
        self.register(Prototype::uint(CHR_EMPHASIS_MARK, "chrEmphasisMark", 2, 0, f));
        self.register(Prototype::uint(CHR_RELIEF, "chrRelief", 2, 0, f));
        self.register(Prototype::void(CHR_DUMMY1, "chrDummy1"));
        self.register(Prototype::void(TXT_SOFTHYPH, "textSoftHyphen"));
        self.register(Prototype::void(TXT_UNKNOWN_CONTAINER, "textUnknownContainer"));
    }

    fn init_paragraph(&mut self) {
        let p = Scope::PARAGRAPH;
        self.register(Prototype::boolean(PARA_SPLIT, "paraSplit", true, p));
        self.register(Prototype::uint(PARA_ORPHANS, "paraOrphans", 1, 0, p));
        self.register(Prototype::uint(PARA_WIDOWS, "paraWidows", 1, 0, p));
        self.register(Prototype::boolean(PARA_REGISTER, "paraRegister", false, p));
        self.register(Prototype::boolean(PARA_SCRIPTSPACE, "paraScriptSpace", false, p));
        self.register(Prototype::boolean(
            PARA_HANGINGPUNCTUATION,
            "paraHangingPunctuation",
            true,
            p,
        ));
        self.register(Prototype::boolean(PARA_FORBIDDEN_RULES, "paraForbiddenRules", true, p));
        self.register(Prototype::uint(PARA_VERTALIGN, "paraVertAlign", 2, 0, p));
        self.register(Prototype::boolean(PARA_SNAPTOGRID, "paraSnapToGrid", true, p));
        self.register(Prototype::boolean(PARA_CONNECT_BORDER, "paraConnectBorder", true, p));
    }

    fn init_frame(&mut self) {
        let g = Scope::GRAPHIC;
        let pg = Scope::GRAPHIC | Scope::PAGE;
        self.register(Prototype::uint(FRM_FILL_ORDER, "frmFillOrder", 1, 0, g));
        self.register(Prototype::uint(FRM_PAPER_BIN, "frmPaperBin", 1, 0xFF, Scope::PAGE));
        self.register(Prototype::boolean(FRM_PRINT, "frmPrint", true, g));
        self.register(Prototype::boolean(FRM_OPAQUE, "frmOpaque", true, g));
        self.register(Prototype::boolean(FRM_KEEP, "frmKeep", false, g));
        self.register(Prototype::boolean(FRM_EDIT_IN_READONLY, "frmEditInReadOnly", false, g));
        self.register(Prototype::boolean(FRM_LAYOUT_SPLIT, "frmLayoutSplit", true, g));
        self.register(Prototype::boolean(FRM_COLUMNBALANCE, "frmColNoBalanced", true, pg));
        self.register(Prototype::uint(FRM_FRAMEDIR, "frmFrameDir", 2, 4, pg));
        self.register(Prototype::boolean(
            FRM_HEADER_FOOTER_EAT_SPACING,
            "frmHeadFootEatSpacing",
            false,
            Scope::PAGE,
        ));
        self.register(Prototype::boolean(FRM_DUMMY9, "frmGrfDummy9", false, g));
    }

    fn init_graphic(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::int(GRF_ROTATION, "grfRotation", 2, 0, g));
        self.register(Prototype::int(GRF_LUMINANCE, "grfLuminance", 2, 0, g));
        self.register(Prototype::int(GRF_CONTRAST, "grfContrast", 2, 0, g));
        self.register(Prototype::int(GRF_CHANNELR, "grfChannelR", 2, 0, g));
        self.register(Prototype::int(GRF_CHANNELG, "grfChannelG", 2, 0, g));
        self.register(Prototype::int(GRF_CHANNELB, "grfChannelB", 2, 0, g));
        self.register(Prototype::double(GRF_GAMMA, "grfGamma", 1.0, g));
        self.register(Prototype::boolean(GRF_INVERT, "grfInvert", false, g));
        self.register(Prototype::uint(GRF_TRANSPARENCY, "grfTransparency", 1, 0, g));
        self.register(Prototype::uint(GRF_DRAWMODE, "grfDrawMode", 2, 0, g));
        self.register_range(GRF_DUMMY1, GRF_DUMMY5, |which, i| {
            Prototype::boolean(which, format!("grfDummy{}", i + 1), false, g)
        });
    }

    fn init_cell(&mut self) {
        let c = Scope::CELL;
        self.register(Prototype::uint(CELL_HOR_JUSTIFY, "cellHorJustify", 2, 0, c));
        self.register(Prototype::uint(CELL_VER_JUSTIFY, "cellVerJustify", 2, 0, c));
        self.register(Prototype::uint(CELL_INDENT, "cellIndent", 2, 0, c));
        self.register(Prototype::uint(CELL_ORIENTATION, "cellOrientation", 2, 0, c));
        self.register(Prototype::int(CELL_ROTATE_VALUE, "cellRotateValue", 4, 0, c));
        self.register(Prototype::uint(CELL_ROTATE_MODE, "cellRotateMode", 2, 0, c));
        self.register(Prototype::boolean(CELL_VERTICAL_ASIAN, "cellVerticalAsian", false, c));
        self.register(Prototype::boolean(CELL_LINEBREAK, "cellLineBreak", false, c));
        self.register(Prototype::boolean(CELL_SHRINK_TO_FIT, "cellShrinkToFit", false, c));
    }

    fn init_page(&mut self) {
        let p = Scope::PAGE;
        self.register(Prototype::boolean(PAGE_LANDSCAPE, "pageLandscape", false, p));
        self.register(Prototype::uint(PAGE_NUMBERTYPE, "pageNumberType", 2, 4, p));
        self.register(Prototype::vec2i(PAGE_SIZE, "pageSize", 4, p));
        self.register(Prototype::vec2i(PAGE_MAXSIZE, "pageMaxSize", 4, p));
        self.register(Prototype::boolean(PAGE_ON, "pageOn", false, p));
        self.register(Prototype::boolean(PAGE_DYNAMIC, "pageDynamic", true, p));
        self.register(Prototype::boolean(PAGE_SHARED, "pageShared", true, p));
        self.register(Prototype::item_set(PAGE_HEADERSET, "pageHeaderSet", PAGE_SET_LIMITS));
        self.register(Prototype::item_set(PAGE_FOOTERSET, "pageFooterSet", PAGE_SET_LIMITS));
    }

    fn init_edit_engine(&mut self) {
        let f = Scope::FONT;
        let p = Scope::PARAGRAPH;
        self.register(Prototype::void(EE_CHAR_RUBI_DUMMY, "eeChrRubiDummy"));
        self.register(Prototype::xml(EE_CHAR_XMLATTRIBS, "eeChrXmlAttrib"));
        self.register(Prototype::xml(EE_PARA_XMLATTRIBS, "eeParaXmlAttrib"));
        self.register(Prototype::boolean(
            EE_PARA_ASIANCJKSPACING,
            "eeParaAsianCJKSpacing",
            false,
            p,
        ));
        self.register(Prototype::boolean(EE_PARA_HYPHENATE, "eeParaHyphenate", false, p));
        self.register(Prototype::uint(EE_PARA_BULLETSTATE, "eeParaBulletState", 2, 0, p));
        self.register(Prototype::uint(EE_PARA_OUTLLEVEL, "eeParaOutlLevel", 2, 0, p));
        self.register(Prototype::color(EE_CHAR_COLOR, "eeChrColor", RGBColor::BLACK, f));
        self.register(Prototype::uint(EE_CHAR_WEIGHT, "eeChrWeight", 1, 5, f));
        self.register(Prototype::uint(EE_CHAR_UNDERLINE, "eeChrUnderline", 1, 0, f));
        self.register(Prototype::uint(EE_CHAR_STRIKEOUT, "eeChrStrikeOut", 1, 0, f));
        self.register(Prototype::uint(EE_CHAR_ITALIC, "eeChrItalic", 1, 0, f));
        self.register(Prototype::boolean(EE_CHAR_OUTLINE, "eeChrOutline", false, f));
        self.register(Prototype::boolean(EE_CHAR_SHADOW, "eeChrShadow", false, f));
        self.register(Prototype::boolean(EE_CHAR_PAIRKERNING, "eeChrPairKerning", false, f));
        self.register(Prototype::int(EE_CHAR_KERNING, "eeChrKerning", 2, 0, f));
        self.register(Prototype::boolean(EE_CHAR_WLM, "eeChrWordLineMode", false, f));
        self.register(Prototype::uint(EE_CHAR_LANGUAGE, "eeChrLanguage", 2, 0x3FF, f));
        self.register(Prototype::uint(EE_CHAR_LANGUAGE_CJK, "eeChrLanguageCJK", 2, 0x3FF, f));
        self.register(Prototype::uint(EE_CHAR_LANGUAGE_CTL, "eeChrLanguageCTL", 2, 0x3FF, f));
        self.register(Prototype::uint(EE_CHAR_EMPHASISMARK, "eeChrEmphasisMark", 2, 0, f));
        self.register(Prototype::uint(EE_CHAR_RELIEF, "eeChrRelief", 2, 0, f));
        self.register(Prototype::void(EE_FEATURE_TAB, "eeFeatureTab"));
        self.register(Prototype::void(EE_FEATURE_LINEBR, "eeFeatureLineBreak"));
        self.register(Prototype::void(EE_FEATURE_NOTCONV, "eeFeatureNotConv"));
    }

    fn init_chart(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::boolean(SCH_DATADESCR_SHOW_SYM, "schDataDescrShowSym", false, g));
        self.register(Prototype::uint(SCH_DATADESCR_DESCR, "schDataDescr", 2, 0, g));
        self.register(Prototype::uint(SCH_LEGEND_POS, "schLegendPos", 2, 3, g));
        self.register(Prototype::uint(SCH_TEXT_ORIENT, "schTextOrient", 2, 1, g));
        self.register(Prototype::uint(SCH_TEXT_ORDER, "schTextOrder", 2, 0, g));

        const AXES: [&str; 4] = ["XAxis", "YAxis", "ZAxis", "Axis"];
        for (axis, prefix) in (0u32..).zip(AXES) {
            let first = sch_axis(axis, 0);
            self.register_range(first, first + SCH_AXIS_BLOCK_LEN - 1, |which, field| {
                let (suffix, is_bool) = match field {
                    0 => ("AutoMin", true),
                    1 => ("Min", false),
                    2 => ("AutoMax", true),
                    3 => ("Max", false),
                    4 => ("AutoStepMain", true),
                    5 => ("StepMain", false),
                    6 => ("AutoStepHelp", true),
                    7 => ("StepHelp", false),
                    8 => ("Logarithm", true),
                    9 => ("AutoOrigin", true),
                    _ => ("Origin", false),
                };
                let name = format!("sch{prefix}{suffix}");
                if is_bool {
                    Prototype::boolean(which, name, false, g)
                } else {
                    Prototype::double(which, name, 0.0, g)
                }
            });
        }

        self.register(Prototype::int(SCH_AXISTYPE, "schAxisType", 4, 0, g));
        self.register_range(SCH_DUMMY0, SCH_DUMMY4, |which, i| {
            Prototype::int(which, format!("schDummy{i}"), 4, 0, g)
        });
        self.register(Prototype::int(SCH_STAT_KIND_ERROR, "schStatKindError", 4, 0, g));
        self.register(Prototype::double(SCH_STAT_PERCENT, "schStatPercent", 0.0, g));
        self.register(Prototype::double(SCH_STAT_BIGERROR, "schStatBigError", 0.0, g));
        self.register(Prototype::double(SCH_STAT_CONSTPLUS, "schStatConstPlus", 0.0, g));
        self.register(Prototype::double(SCH_STAT_CONSTMINUS, "schStatConstMinus", 0.0, g));
        self.register(Prototype::boolean(SCH_STAT_AVERAGE, "schStatAverage", false, g));
        self.register(Prototype::int(SCH_STAT_REGRESSTYPE, "schStatRegressType", 4, 0, g));
        self.register(Prototype::int(SCH_STAT_INDICATE, "schStatIndicate", 4, 0, g));
        self.register(Prototype::int(SCH_TEXT_DEGREES, "schTextDegrees", 4, 0, g));
        self.register(Prototype::boolean(SCH_TEXT_OVERLAP, "schTextOverlap", false, g));
        self.register_range(SCH_TEXT_DUMMY0, SCH_TEXT_DUMMY3, |which, i| {
            Prototype::int(which, format!("schTextDummy{i}"), 4, 0, g)
        });
        self.register(Prototype::boolean(SCH_STYLE_DEEP, "schStyleDeep", false, g));
        self.register(Prototype::boolean(SCH_STYLE_3D, "schStyle3D", false, g));
        self.register(Prototype::boolean(SCH_STYLE_VERTICAL, "schStyleVertical", false, g));
        self.register(Prototype::int(SCH_STYLE_BASETYPE, "schStyleBaseType", 4, 0, g));
        self.register(Prototype::boolean(SCH_STYLE_LINES, "schStyleLines", false, g));
        self.register(Prototype::boolean(SCH_STYLE_PERCENT, "schStylePercent", false, g));
        self.register(Prototype::boolean(SCH_STYLE_STACKED, "schStyleStacked", false, g));
        self.register(Prototype::int(SCH_STYLE_SPLINES, "schStyleSplines", 4, 0, g));
        self.register(Prototype::int(SCH_STYLE_SYMBOL, "schStyleSymbol", 4, 0, g));
        self.register(Prototype::int(SCH_STYLE_SHAPE, "schStyleShape", 4, 0, g));
        self.register(Prototype::int(SCH_AXIS, "schAxis", 4, 2, g));
        self.register(Prototype::int(SCH_AXIS_TICKS, "schAxisTicks", 4, 0, g));
        self.register(Prototype::int(SCH_AXIS_HELPTICKS, "schAxisHelpTicks", 4, 2, g));
        self.register(Prototype::uint(SCH_AXIS_NUMFMT, "schAxisNumFmt", 4, 0, g));
        self.register(Prototype::uint(SCH_AXIS_NUMFMTPERCENT, "schAxisNumFmtPercent", 4, 11, g));
        self.register(Prototype::boolean(SCH_AXIS_SHOWAXIS, "schAxisShow", false, g));
        self.register(Prototype::boolean(SCH_AXIS_SHOWDESCR, "schAxisShowDescr", false, g));
        self.register(Prototype::boolean(SCH_AXIS_SHOWMAINGRID, "schAxisShowMainGrid", false, g));
        self.register(Prototype::boolean(SCH_AXIS_SHOWHELPGRID, "schAxisShowHelpGrid", false, g));
        self.register(Prototype::boolean(SCH_AXIS_TOPDOWN, "schAxisTopDown", false, g));
        self.register_range(SCH_AXIS_DUMMY0, SCH_AXIS_DUMMY3, |which, i| {
            Prototype::int(which, format!("schAxisDummy{i}"), 4, 0, g)
        });
        self.register(Prototype::int(SCH_BAR_OVERLAP, "schBarOverlap", 4, 0, g));
        self.register(Prototype::int(SCH_BAR_GAPWIDTH, "schBarGapWidth", 4, 0, g));
        self.register(Prototype::boolean(SCH_STOCK_VOLUME, "schStockVolume", false, g));
        self.register(Prototype::boolean(SCH_STOCK_UPDOWN, "schStockUpDown", false, g));
        self.register(Prototype::xml(SCH_USER_DEFINED_ATTR, "schUserDefined"));
    }

    fn init_form_text(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::uint(XATTR_FORMTXTSTYLE, "formTextStyle", 2, 4, g));
        self.register(Prototype::uint(XATTR_FORMTXTADJUST, "formTextAdjust", 2, 3, g));
        self.register(Prototype::int(XATTR_FORMTXTDISTANCE, "formTextDistance", 4, 0, g));
        self.register(Prototype::int(XATTR_FORMTXTSTART, "formTextStart", 4, 0, g));
        self.register(Prototype::boolean(XATTR_FORMTXTMIRROR, "formTextMirror", false, g));
        self.register(Prototype::boolean(XATTR_FORMTXTOUTLINE, "formTextOutline", false, g));
        self.register(Prototype::uint(XATTR_FORMTXTSHADOW, "formTextShadow", 2, 0, g));
        self.register(Prototype::color(
            XATTR_FORMTXTSHDWCOLOR,
            "formTextShadowColor",
            RGBColor::BLACK,
            g,
        ));
        self.register(Prototype::int(XATTR_FORMTXTSHDWXVAL, "formTextShadowXDist", 4, 0, g));
        self.register(Prototype::int(XATTR_FORMTXTSHDWYVAL, "formTextShadowYDist", 4, 0, g));
        self.register(Prototype::uint(XATTR_FORMTXTSTDFORM, "formTextStdForm", 2, 0, g));
        self.register(Prototype::boolean(XATTR_FORMTXTHIDEFORM, "formTextHide", false, g));
        self.register(Prototype::uint(XATTR_FORMTXTSHDWTRANSP, "formTextShadowTrans", 2, 0, g));
        self.register_range(XATTR_FTRESERVED2, XATTR_FTRESERVED_LAST, |which, i| {
            Prototype::void(which, format!("formTextReserved{}", i + 2))
        });
    }

    fn init_sdr(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::int(SDRATTR_ECKENRADIUS, "sdrEckenRadius", 4, 0, g));
        self.register(Prototype::uint(SDRATTR_LAYERID, "sdrLayerId", 2, 0, g));
        let geometry = [
            (SDRATTR_ALLPOSITIONX, "sdrAllPositionX"),
            (SDRATTR_ALLPOSITIONY, "sdrAllPositionY"),
            (SDRATTR_ALLSIZEWIDTH, "sdrAllSizeWidth"),
            (SDRATTR_ALLSIZEHEIGHT, "sdrAllSizeHeight"),
            (SDRATTR_ONEPOSITIONX, "sdrOnePositionX"),
            (SDRATTR_ONEPOSITIONY, "sdrOnePositionY"),
            (SDRATTR_ONESIZEWIDTH, "sdrOneSizeWidth"),
            (SDRATTR_ONESIZEHEIGHT, "sdrOneSizeHeight"),
            (SDRATTR_LOGICSIZEWIDTH, "sdrLogicSizeWidth"),
            (SDRATTR_LOGICSIZEHEIGHT, "sdrLogicSizeHeight"),
            (SDRATTR_ROTATEANGLE, "sdrRotateAngle"),
            (SDRATTR_SHEARANGLE, "sdrShearAngle"),
            (SDRATTR_MOVEX, "sdrMoveX"),
            (SDRATTR_MOVEY, "sdrMoveY"),
            (SDRATTR_ROTATEONE, "sdrRotateOne"),
            (SDRATTR_HORZSHEARONE, "sdrHorzShearOne"),
            (SDRATTR_VERTSHEARONE, "sdrVertShearOne"),
            (SDRATTR_ROTATEALL, "sdrRotateAll"),
            (SDRATTR_HORZSHEARALL, "sdrHorzShearAll"),
            (SDRATTR_VERTSHEARALL, "sdrVertShearAll"),
            (SDRATTR_TRANSFORMREF1X, "sdrTransformRef1X"),
            (SDRATTR_TRANSFORMREF1Y, "sdrTransformRef1Y"),
            (SDRATTR_TRANSFORMREF2X, "sdrTransformRef2X"),
            (SDRATTR_TRANSFORMREF2Y, "sdrTransformRef2Y"),
        ];
        for (which, name) in geometry {
            self.register(Prototype::int(which, name, 4, 0, g));
        }
        self.register(Prototype::uint(SDRATTR_TEXTDIRECTION, "sdrTextDirection", 2, 0, g));
        self.register_range(SDRATTR_NOTPERSISTRESERVE2, SDRATTR_NOTPERSISTRESERVE15, |which, i| {
            Prototype::void(which, format!("sdrNotPersistReserve{}", i + 2))
        });

        self.register(Prototype::int(SDRATTR_GRAFRED, "grafRed", 2, 0, g));
        self.register(Prototype::int(SDRATTR_GRAFGREEN, "grafGreen", 2, 0, g));
        self.register(Prototype::int(SDRATTR_GRAFBLUE, "grafBlue", 2, 0, g));
        self.register(Prototype::int(SDRATTR_GRAFLUMINANCE, "grafLuminance", 2, 0, g));
        self.register(Prototype::int(SDRATTR_GRAFCONTRAST, "grafContrast", 2, 0, g));
        self.register(Prototype::uint(SDRATTR_GRAFGAMMA, "grafGamma", 4, 100, g));
        self.register(Prototype::uint(SDRATTR_GRAFTRANSPARENCE, "grafTransparence", 2, 0, g));
        self.register(Prototype::boolean(SDRATTR_GRAFINVERT, "grafInvert", false, g));
        self.register(Prototype::uint(SDRATTR_GRAFMODE, "grafMode", 2, 0, g));
        self.register_range(SDRATTR_GRAFRESERVE3, SDRATTR_GRAFRESERVE6, |which, i| {
            Prototype::void(which, format!("grafReserve{}", i + 3))
        });

        self.register(Prototype::item_set(SDRATTR_SET_OUTLINER, "setOutliner", OUTLINER_LIMITS));
    }

    fn init_3d_object(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::uint(
            SDRATTR_3DOBJ_PERCENT_DIAGONAL,
            "3dObjPercentDiagonal",
            2,
            10,
            g,
        ));
        self.register(Prototype::uint(SDRATTR_3DOBJ_BACKSCALE, "3dObjBackscale", 2, 100, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_DEPTH, "3dObjDepth", 4, 1000, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_HORZ_SEGS, "3dObjHoriSegments", 4, 24, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_VERT_SEGS, "3dObjVertSegments", 4, 24, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_END_ANGLE, "3dObjEndAngle", 4, 3600, g));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_DOUBLE_SIDED, "3dObjDoubleSided", false, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_NORMALS_KIND, "3dObjNormalKind", 2, 0, g));
        self.register(Prototype::boolean(
            SDRATTR_3DOBJ_NORMALS_INVERT,
            "3dObjInvertNormal",
            false,
            g,
        ));
        self.register(Prototype::uint(SDRATTR_3DOBJ_TEXTURE_PROJ_X, "3dObjTextureProjX", 2, 0, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_TEXTURE_PROJ_Y, "3dObjTextureProjY", 2, 0, g));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_SHADOW_3D, "3dObjShadow", false, g));
        self.register(Prototype::color(
            SDRATTR_3DOBJ_MAT_COLOR,
            "3dObjMatColor",
            RGBColor::new(0xFF, 0xB8, 0),
            g,
        ));
        self.register(Prototype::color(
            SDRATTR_3DOBJ_MAT_EMISSION,
            "3dObjMatEmission",
            RGBColor::BLACK,
            g,
        ));
        self.register(Prototype::color(
            SDRATTR_3DOBJ_MAT_SPECULAR,
            "3dObjMatSpecular",
            RGBColor::WHITE,
            g,
        ));
        self.register(Prototype::uint(
            SDRATTR_3DOBJ_MAT_SPECULAR_INTENSITY,
            "3dObjMatSpecularIntensity",
            2,
            15,
            g,
        ));
        self.register(Prototype::uint(SDRATTR_3DOBJ_TEXTURE_KIND, "3dObjTextureKind", 2, 3, g));
        self.register(Prototype::uint(SDRATTR_3DOBJ_TEXTURE_MODE, "3dObjTextureMode", 2, 2, g));
        self.register(Prototype::boolean(
            SDRATTR_3DOBJ_TEXTURE_FILTER,
            "3dObjTextureFilter",
            false,
            g,
        ));
        self.register(Prototype::boolean(
            SDRATTR_3DOBJ_SMOOTH_NORMALS,
            "3dObjSmoothNormals",
            true,
            g,
        ));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_SMOOTH_LIDS, "3dObjSmoothLids", false, g));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_CHARACTER_MODE, "3dObjCharMode", false, g));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_CLOSE_FRONT, "3dObjCloseFront", true, g));
        self.register(Prototype::boolean(SDRATTR_3DOBJ_CLOSE_BACK, "3dObjCloseBack", true, g));
        self.register_range(SDRATTR_3DOBJ_RESERVED_06, SDRATTR_3DOBJ_RESERVED_20, |which, i| {
            Prototype::void(which, format!("3dObjReserved{}", i + 6))
        });
    }

    fn init_3d_scene(&mut self) {
        let g = Scope::GRAPHIC;
        self.register(Prototype::uint(SDRATTR_3DSCENE_PERSPECTIVE, "3dScenePerspective", 2, 1, g));
        self.register(Prototype::uint(SDRATTR_3DSCENE_DISTANCE, "3dSceneDistance", 4, 100, g));
        self.register(Prototype::uint(
            SDRATTR_3DSCENE_FOCAL_LENGTH,
            "3dSceneFocalLength",
            4,
            100,
            g,
        ));
        self.register(Prototype::uint(SDRATTR_3DSCENE_SHADOW_SLANT, "3dSceneShadowSlant", 2, 0, g));
        self.register(Prototype::uint(SDRATTR_3DSCENE_SHADE_MODE, "3dSceneShadeMode", 2, 2, g));
        self.register(Prototype::boolean(
            SDRATTR_3DSCENE_TWO_SIDED_LIGHTING,
            "3dSceneTwoSidedLighting",
            false,
            g,
        ));
        self.register_range(SDRATTR_3DSCENE_LIGHTCOLOR_1, SDRATTR_3DSCENE_LIGHTCOLOR_8, |which, i| {
            let default = if i == 0 {
                RGBColor::new(0xCC, 0xCC, 0xCC)
            } else {
                RGBColor::BLACK
            };
            Prototype::color(which, format!("3dSceneLightColor{}", i + 1), default, g)
        });
        self.register(Prototype::color(
            SDRATTR_3DSCENE_AMBIENTCOLOR,
            "3dSceneAmbientColor",
            RGBColor::new(0x66, 0x66, 0x66),
            g,
        ));
        self.register_range(SDRATTR_3DSCENE_LIGHTON_1, SDRATTR_3DSCENE_LIGHTON_8, |which, i| {
            Prototype::boolean(which, format!("3dSceneLightOn{}", i + 1), i == 0, g)
        });
        self.register_range(SDRATTR_3DSCENE_RESERVED_01, SDRATTR_3DSCENE_RESERVED_20, |which, i| {
            Prototype::void(which, format!("3dSceneReserved{}", i + 1))
        });
    }
}

/// Decode the value of `prototype` at the current position.
fn read_value(
    prototype: &Prototype,
    zone: &mut StarZone,
    last_pos: usize,
    doc: &mut dyn DocumentContext,
) -> Result<AttributeValue> {
    let input = zone.input();
    let value = match prototype.kind() {
        AttributeKind::Void | AttributeKind::Xml => prototype.default_value().clone(),
        AttributeKind::Bool => AttributeValue::Bool(input.read_bool()?),
        AttributeKind::Int { width } => AttributeValue::Int(input.read_int(*width)?),
        AttributeKind::UInt { width } => AttributeValue::UInt(input.read_uint(*width)?),
        AttributeKind::Double => AttributeValue::Double(input.read_f64()?),
        AttributeKind::Color => AttributeValue::Color(input.read_color()?),
        AttributeKind::Vec2i { width } => {
            let x = input.read_int(*width)?;
            let y = input.read_int(*width)?;
            AttributeValue::Vec2i(x, y)
        },
        AttributeKind::ItemSet { limits } => {
            let pool = doc.current_pool();
            let id = doc
                .read_item_set(zone, limits, last_pos, pool)
                .ok_or_else(|| {
                    Error::Corrupted(format!("{}: bad nested item set", prototype.name()))
                })?;
            AttributeValue::ItemSet(Some(id))
        },
    };
    Ok(value)
}
