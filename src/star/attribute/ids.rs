//! Attribute "which" identifiers, grouped by family.
//!
//! Identifiers inside a family are contiguous so that item sets can be
//! filtered with `(first, last)` limit pairs.

// Character attributes
pub const CHR_CASEMAP: u32 = 1;
pub const CHR_CHARSETCOLOR: u32 = 2;
pub const CHR_COLOR: u32 = 3;
pub const CHR_CONTOUR: u32 = 4;
pub const CHR_CROSSEDOUT: u32 = 5;
pub const CHR_ESCAPEMENT: u32 = 6;
pub const CHR_FONT: u32 = 7;
pub const CHR_FONTSIZE: u32 = 8;
pub const CHR_KERNING: u32 = 9;
pub const CHR_LANGUAGE: u32 = 10;
pub const CHR_POSTURE: u32 = 11;
pub const CHR_PROPORTIONALFONTSIZE: u32 = 12;
pub const CHR_SHADOWED: u32 = 13;
pub const CHR_UNDERLINE: u32 = 14;
pub const CHR_WEIGHT: u32 = 15;
pub const CHR_WORDLINEMODE: u32 = 16;
pub const CHR_AUTOKERN: u32 = 17;
pub const CHR_BLINK: u32 = 18;
pub const CHR_NOHYPHEN: u32 = 19;
pub const CHR_NOLINEBREAK: u32 = 20;
pub const CHR_BACKGROUND: u32 = 21;
pub const CHR_CJK_FONT: u32 = 22;
pub const CHR_CJK_FONTSIZE: u32 = 23;
pub const CHR_CJK_LANGUAGE: u32 = 24;
pub const CHR_CJK_POSTURE: u32 = 25;
pub const CHR_CJK_WEIGHT: u32 = 26;
pub const CHR_CTL_FONT: u32 = 27;
pub const CHR_CTL_FONTSIZE: u32 = 28;
pub const CHR_CTL_LANGUAGE: u32 = 29;
pub const CHR_CTL_POSTURE: u32 = 30;
pub const CHR_CTL_WEIGHT: u32 = 31;
pub const CHR_ROTATE: u32 = 32;
pub const CHR_EMPHASIS_MARK: u32 = 33;
pub const CHR_TWO_LINES: u32 = 34;
pub const CHR_SCALEW: u32 = 35;
pub const CHR_RELIEF: u32 = 36;
pub const CHR_DUMMY1: u32 = 37;
pub const CHR_BEGIN: u32 = CHR_CASEMAP;
pub const CHR_END: u32 = 40;

// Text attributes
pub const TXT_INETFMT: u32 = 41;
pub const TXT_REFMARK: u32 = 42;
pub const TXT_TOXMARK: u32 = 43;
pub const TXT_CHARFMT: u32 = 44;
pub const TXT_CJK_RUBY: u32 = 45;
pub const TXT_UNKNOWN_CONTAINER: u32 = 46;
pub const TXT_FIELD: u32 = 47;
pub const TXT_FLYCNT: u32 = 48;
pub const TXT_FTN: u32 = 49;
pub const TXT_SOFTHYPH: u32 = 50;
pub const TXT_HARDBLANK: u32 = 51;
pub const TXT_BEGIN: u32 = TXT_INETFMT;
pub const TXT_END: u32 = 60;

// Paragraph attributes
pub const PARA_LINESPACING: u32 = 61;
pub const PARA_ADJUST: u32 = 62;
pub const PARA_SPLIT: u32 = 63;
pub const PARA_ORPHANS: u32 = 64;
pub const PARA_WIDOWS: u32 = 65;
pub const PARA_TABSTOP: u32 = 66;
pub const PARA_HYPHENZONE: u32 = 67;
pub const PARA_DROP: u32 = 68;
pub const PARA_REGISTER: u32 = 69;
pub const PARA_NUMRULE: u32 = 70;
pub const PARA_SCRIPTSPACE: u32 = 71;
pub const PARA_HANGINGPUNCTUATION: u32 = 72;
pub const PARA_FORBIDDEN_RULES: u32 = 73;
pub const PARA_VERTALIGN: u32 = 74;
pub const PARA_SNAPTOGRID: u32 = 75;
pub const PARA_CONNECT_BORDER: u32 = 76;
pub const PARA_BEGIN: u32 = PARA_LINESPACING;
pub const PARA_END: u32 = 90;

// Frame attributes
pub const FRM_FILL_ORDER: u32 = 91;
pub const FRM_FRM_SIZE: u32 = 92;
pub const FRM_PAPER_BIN: u32 = 93;
pub const FRM_LR_SPACE: u32 = 94;
pub const FRM_UL_SPACE: u32 = 95;
pub const FRM_PAGEDESC: u32 = 96;
pub const FRM_BREAK: u32 = 97;
pub const FRM_CNTNT: u32 = 98;
pub const FRM_HEADER: u32 = 99;
pub const FRM_FOOTER: u32 = 100;
pub const FRM_PRINT: u32 = 101;
pub const FRM_OPAQUE: u32 = 102;
pub const FRM_PROTECT: u32 = 103;
pub const FRM_SURROUND: u32 = 104;
pub const FRM_VERT_ORIENT: u32 = 105;
pub const FRM_HORI_ORIENT: u32 = 106;
pub const FRM_ANCHOR: u32 = 107;
pub const FRM_BACKGROUND: u32 = 108;
pub const FRM_BOX: u32 = 109;
pub const FRM_SHADOW: u32 = 110;
pub const FRM_FRMMACRO: u32 = 111;
pub const FRM_COL: u32 = 112;
pub const FRM_KEEP: u32 = 113;
pub const FRM_URL: u32 = 114;
pub const FRM_EDIT_IN_READONLY: u32 = 115;
pub const FRM_LAYOUT_SPLIT: u32 = 116;
pub const FRM_CHAIN: u32 = 117;
pub const FRM_TEXTGRID: u32 = 118;
pub const FRM_LINENUMBER: u32 = 119;
pub const FRM_FTN_AT_TXTEND: u32 = 120;
pub const FRM_END_AT_TXTEND: u32 = 121;
pub const FRM_COLUMNBALANCE: u32 = 122;
pub const FRM_FRAMEDIR: u32 = 123;
pub const FRM_HEADER_FOOTER_EAT_SPACING: u32 = 124;
pub const FRM_DUMMY9: u32 = 125;
pub const FRM_BEGIN: u32 = FRM_FILL_ORDER;
pub const FRM_END: u32 = 150;

// Writer graphic attributes
pub const GRF_MIRRORGRF: u32 = 151;
pub const GRF_CROPGRF: u32 = 152;
pub const GRF_ROTATION: u32 = 153;
pub const GRF_LUMINANCE: u32 = 154;
pub const GRF_CONTRAST: u32 = 155;
pub const GRF_CHANNELR: u32 = 156;
pub const GRF_CHANNELG: u32 = 157;
pub const GRF_CHANNELB: u32 = 158;
pub const GRF_GAMMA: u32 = 159;
pub const GRF_INVERT: u32 = 160;
pub const GRF_TRANSPARENCY: u32 = 161;
pub const GRF_DRAWMODE: u32 = 162;
pub const GRF_DUMMY1: u32 = 163;
pub const GRF_DUMMY5: u32 = 167;
pub const GRF_BEGIN: u32 = GRF_MIRRORGRF;
pub const GRF_END: u32 = 175;

// Table box attributes
pub const BOX_FORMAT: u32 = 176;
pub const BOX_FORMULA: u32 = 177;
pub const BOX_VALUE: u32 = 178;
pub const BOX_BEGIN: u32 = BOX_FORMAT;
pub const BOX_END: u32 = 180;

// Spreadsheet cell attributes
pub const CELL_HOR_JUSTIFY: u32 = 200;
pub const CELL_VER_JUSTIFY: u32 = 201;
pub const CELL_INDENT: u32 = 202;
pub const CELL_ORIENTATION: u32 = 203;
pub const CELL_ROTATE_VALUE: u32 = 204;
pub const CELL_ROTATE_MODE: u32 = 205;
pub const CELL_VERTICAL_ASIAN: u32 = 206;
pub const CELL_LINEBREAK: u32 = 207;
pub const CELL_SHRINK_TO_FIT: u32 = 208;
pub const CELL_BEGIN: u32 = CELL_HOR_JUSTIFY;
pub const CELL_END: u32 = 249;

// Page attributes
pub const PAGE_LANDSCAPE: u32 = 250;
pub const PAGE_NUMBERTYPE: u32 = 251;
pub const PAGE_SIZE: u32 = 252;
pub const PAGE_MAXSIZE: u32 = 253;
pub const PAGE_ON: u32 = 254;
pub const PAGE_DYNAMIC: u32 = 255;
pub const PAGE_SHARED: u32 = 256;
pub const PAGE_HEADERSET: u32 = 257;
pub const PAGE_FOOTERSET: u32 = 258;
pub const PAGE_BEGIN: u32 = PAGE_LANDSCAPE;
pub const PAGE_END: u32 = 270;

// Drawing form-text attributes
pub const XATTR_FORMTXTSTYLE: u32 = 1000;
pub const XATTR_FORMTXTADJUST: u32 = 1001;
pub const XATTR_FORMTXTDISTANCE: u32 = 1002;
pub const XATTR_FORMTXTSTART: u32 = 1003;
pub const XATTR_FORMTXTMIRROR: u32 = 1004;
pub const XATTR_FORMTXTOUTLINE: u32 = 1005;
pub const XATTR_FORMTXTSHADOW: u32 = 1006;
pub const XATTR_FORMTXTSHDWCOLOR: u32 = 1007;
pub const XATTR_FORMTXTSHDWXVAL: u32 = 1008;
pub const XATTR_FORMTXTSHDWYVAL: u32 = 1009;
pub const XATTR_FORMTXTSTDFORM: u32 = 1010;
pub const XATTR_FORMTXTHIDEFORM: u32 = 1011;
pub const XATTR_FORMTXTSHDWTRANSP: u32 = 1012;
pub const XATTR_FTRESERVED2: u32 = 1013;
pub const XATTR_FTRESERVED_LAST: u32 = 1016;

// Drawing (sdr) attributes
pub const SDRATTR_ECKENRADIUS: u32 = 1100;
pub const SDRATTR_AUTOSHAPE_ADJUSTMENT: u32 = 1101;
pub const SDRATTR_MEASURESCALE: u32 = 1102;
pub const SDRATTR_MEASUREFORMATSTRING: u32 = 1103;
pub const SDRATTR_LAYERID: u32 = 1110;
pub const SDRATTR_LAYERNAME: u32 = 1111;
pub const SDRATTR_OBJECTNAME: u32 = 1112;
pub const SDRATTR_ALLPOSITIONX: u32 = 1113;
pub const SDRATTR_ALLPOSITIONY: u32 = 1114;
pub const SDRATTR_ALLSIZEWIDTH: u32 = 1115;
pub const SDRATTR_ALLSIZEHEIGHT: u32 = 1116;
pub const SDRATTR_ONEPOSITIONX: u32 = 1117;
pub const SDRATTR_ONEPOSITIONY: u32 = 1118;
pub const SDRATTR_ONESIZEWIDTH: u32 = 1119;
pub const SDRATTR_ONESIZEHEIGHT: u32 = 1120;
pub const SDRATTR_LOGICSIZEWIDTH: u32 = 1121;
pub const SDRATTR_LOGICSIZEHEIGHT: u32 = 1122;
pub const SDRATTR_ROTATEANGLE: u32 = 1123;
pub const SDRATTR_SHEARANGLE: u32 = 1124;
pub const SDRATTR_MOVEX: u32 = 1125;
pub const SDRATTR_MOVEY: u32 = 1126;
pub const SDRATTR_RESIZEXONE: u32 = 1127;
pub const SDRATTR_RESIZEYONE: u32 = 1128;
pub const SDRATTR_ROTATEONE: u32 = 1129;
pub const SDRATTR_HORZSHEARONE: u32 = 1130;
pub const SDRATTR_VERTSHEARONE: u32 = 1131;
pub const SDRATTR_RESIZEXALL: u32 = 1132;
pub const SDRATTR_RESIZEYALL: u32 = 1133;
pub const SDRATTR_ROTATEALL: u32 = 1134;
pub const SDRATTR_HORZSHEARALL: u32 = 1135;
pub const SDRATTR_VERTSHEARALL: u32 = 1136;
pub const SDRATTR_TRANSFORMREF1X: u32 = 1137;
pub const SDRATTR_TRANSFORMREF1Y: u32 = 1138;
pub const SDRATTR_TRANSFORMREF2X: u32 = 1139;
pub const SDRATTR_TRANSFORMREF2Y: u32 = 1140;
pub const SDRATTR_TEXTDIRECTION: u32 = 1141;
pub const SDRATTR_NOTPERSISTRESERVE2: u32 = 1142;
pub const SDRATTR_NOTPERSISTRESERVE15: u32 = 1155;

// Drawing graphic attributes
pub const SDRATTR_GRAFRED: u32 = 1160;
pub const SDRATTR_GRAFGREEN: u32 = 1161;
pub const SDRATTR_GRAFBLUE: u32 = 1162;
pub const SDRATTR_GRAFLUMINANCE: u32 = 1163;
pub const SDRATTR_GRAFCONTRAST: u32 = 1164;
pub const SDRATTR_GRAFGAMMA: u32 = 1165;
pub const SDRATTR_GRAFTRANSPARENCE: u32 = 1166;
pub const SDRATTR_GRAFINVERT: u32 = 1167;
pub const SDRATTR_GRAFMODE: u32 = 1168;
pub const SDRATTR_GRAFCROP: u32 = 1169;
pub const SDRATTR_GRAFRESERVE3: u32 = 1170;
pub const SDRATTR_GRAFRESERVE6: u32 = 1173;

/// Nested item set holding the outliner (edit engine) attributes.
pub const SDRATTR_SET_OUTLINER: u32 = 1180;

// 3D object attributes
pub const SDRATTR_3DOBJ_PERCENT_DIAGONAL: u32 = 1200;
pub const SDRATTR_3DOBJ_BACKSCALE: u32 = 1201;
pub const SDRATTR_3DOBJ_DEPTH: u32 = 1202;
pub const SDRATTR_3DOBJ_HORZ_SEGS: u32 = 1203;
pub const SDRATTR_3DOBJ_VERT_SEGS: u32 = 1204;
pub const SDRATTR_3DOBJ_END_ANGLE: u32 = 1205;
pub const SDRATTR_3DOBJ_DOUBLE_SIDED: u32 = 1206;
pub const SDRATTR_3DOBJ_NORMALS_KIND: u32 = 1207;
pub const SDRATTR_3DOBJ_NORMALS_INVERT: u32 = 1208;
pub const SDRATTR_3DOBJ_TEXTURE_PROJ_X: u32 = 1209;
pub const SDRATTR_3DOBJ_TEXTURE_PROJ_Y: u32 = 1210;
pub const SDRATTR_3DOBJ_SHADOW_3D: u32 = 1211;
pub const SDRATTR_3DOBJ_MAT_COLOR: u32 = 1212;
pub const SDRATTR_3DOBJ_MAT_EMISSION: u32 = 1213;
pub const SDRATTR_3DOBJ_MAT_SPECULAR: u32 = 1214;
pub const SDRATTR_3DOBJ_MAT_SPECULAR_INTENSITY: u32 = 1215;
pub const SDRATTR_3DOBJ_TEXTURE_KIND: u32 = 1216;
pub const SDRATTR_3DOBJ_TEXTURE_MODE: u32 = 1217;
pub const SDRATTR_3DOBJ_TEXTURE_FILTER: u32 = 1218;
pub const SDRATTR_3DOBJ_SMOOTH_NORMALS: u32 = 1219;
pub const SDRATTR_3DOBJ_SMOOTH_LIDS: u32 = 1220;
pub const SDRATTR_3DOBJ_CHARACTER_MODE: u32 = 1221;
pub const SDRATTR_3DOBJ_CLOSE_FRONT: u32 = 1222;
pub const SDRATTR_3DOBJ_CLOSE_BACK: u32 = 1223;
pub const SDRATTR_3DOBJ_RESERVED_06: u32 = 1224;
pub const SDRATTR_3DOBJ_RESERVED_20: u32 = 1238;

// 3D scene attributes
pub const SDRATTR_3DSCENE_PERSPECTIVE: u32 = 1240;
pub const SDRATTR_3DSCENE_DISTANCE: u32 = 1241;
pub const SDRATTR_3DSCENE_FOCAL_LENGTH: u32 = 1242;
pub const SDRATTR_3DSCENE_TWO_SIDED_LIGHTING: u32 = 1243;
pub const SDRATTR_3DSCENE_LIGHTCOLOR_1: u32 = 1244;
pub const SDRATTR_3DSCENE_LIGHTCOLOR_8: u32 = 1251;
pub const SDRATTR_3DSCENE_AMBIENTCOLOR: u32 = 1252;
pub const SDRATTR_3DSCENE_LIGHTON_1: u32 = 1253;
pub const SDRATTR_3DSCENE_LIGHTON_8: u32 = 1260;
pub const SDRATTR_3DSCENE_LIGHTDIRECTION_1: u32 = 1261;
pub const SDRATTR_3DSCENE_LIGHTDIRECTION_8: u32 = 1268;
pub const SDRATTR_3DSCENE_SHADOW_SLANT: u32 = 1269;
pub const SDRATTR_3DSCENE_SHADE_MODE: u32 = 1270;
pub const SDRATTR_3DSCENE_RESERVED_01: u32 = 1271;
pub const SDRATTR_3DSCENE_RESERVED_20: u32 = 1290;

// Edit engine attributes
pub const EE_PARA_XMLATTRIBS: u32 = 3989;
pub const EE_PARA_ASIANCJKSPACING: u32 = 3990;
pub const EE_PARA_NUMBULLET: u32 = 3991;
pub const EE_PARA_HYPHENATE: u32 = 3992;
pub const EE_PARA_BULLETSTATE: u32 = 3993;
pub const EE_PARA_OUTLLRSPACE: u32 = 3994;
pub const EE_PARA_OUTLLEVEL: u32 = 3995;
pub const EE_PARA_BULLET: u32 = 3996;
pub const EE_PARA_LRSPACE: u32 = 3997;
pub const EE_PARA_ULSPACE: u32 = 3998;
pub const EE_PARA_SBL: u32 = 3999;
pub const EE_PARA_JUST: u32 = 4000;
pub const EE_PARA_TABS: u32 = 4001;
pub const EE_CHAR_COLOR: u32 = 4002;
pub const EE_CHAR_FONTINFO: u32 = 4003;
pub const EE_CHAR_FONTHEIGHT: u32 = 4004;
pub const EE_CHAR_SCALEW: u32 = 4005;
pub const EE_CHAR_WEIGHT: u32 = 4006;
pub const EE_CHAR_UNDERLINE: u32 = 4007;
pub const EE_CHAR_STRIKEOUT: u32 = 4008;
pub const EE_CHAR_ITALIC: u32 = 4009;
pub const EE_CHAR_OUTLINE: u32 = 4010;
pub const EE_CHAR_SHADOW: u32 = 4011;
pub const EE_CHAR_ESCAPEMENT: u32 = 4012;
pub const EE_CHAR_PAIRKERNING: u32 = 4013;
pub const EE_CHAR_KERNING: u32 = 4014;
pub const EE_CHAR_WLM: u32 = 4015;
pub const EE_CHAR_LANGUAGE: u32 = 4016;
pub const EE_CHAR_LANGUAGE_CJK: u32 = 4017;
pub const EE_CHAR_LANGUAGE_CTL: u32 = 4018;
pub const EE_CHAR_EMPHASISMARK: u32 = 4028;
pub const EE_CHAR_RELIEF: u32 = 4029;
pub const EE_CHAR_RUBI_DUMMY: u32 = 4030;
pub const EE_CHAR_XMLATTRIBS: u32 = 4031;
pub const EE_FEATURE_TAB: u32 = 4034;
pub const EE_FEATURE_LINEBR: u32 = 4035;
pub const EE_FEATURE_NOTCONV: u32 = 4036;
pub const EE_FEATURE_FIELD: u32 = 4037;
pub const EE_ITEMS_START: u32 = 3989;
/// Last identifier stored in an edit text paragraph item set.
pub const EE_CHAR_END: u32 = 4033;
pub const EE_ITEMS_END: u32 = 4037;

// Chart attributes
pub const SCH_DATADESCR_DESCR: u32 = 4100;
pub const SCH_DATADESCR_SHOW_SYM: u32 = 4101;
pub const SCH_LEGEND_POS: u32 = 4102;
pub const SCH_TEXT_ORIENT: u32 = 4103;
pub const SCH_TEXT_ORDER: u32 = 4104;
/// First identifier of the four per-axis blocks (x, y, z, all).
pub const SCH_AXIS_BLOCK_START: u32 = 4105;
/// Number of identifiers in each per-axis block.
pub const SCH_AXIS_BLOCK_LEN: u32 = 11;
pub const SCH_AXISTYPE: u32 = 4149;
pub const SCH_DUMMY0: u32 = 4150;
pub const SCH_DUMMY4: u32 = 4154;
pub const SCH_STAT_KIND_ERROR: u32 = 4155;
pub const SCH_STAT_PERCENT: u32 = 4156;
pub const SCH_STAT_BIGERROR: u32 = 4157;
pub const SCH_STAT_CONSTPLUS: u32 = 4158;
pub const SCH_STAT_CONSTMINUS: u32 = 4159;
pub const SCH_STAT_AVERAGE: u32 = 4160;
pub const SCH_STAT_REGRESSTYPE: u32 = 4161;
pub const SCH_STAT_INDICATE: u32 = 4162;
pub const SCH_TEXT_DEGREES: u32 = 4163;
pub const SCH_TEXT_OVERLAP: u32 = 4164;
pub const SCH_TEXT_DUMMY0: u32 = 4165;
pub const SCH_TEXT_DUMMY3: u32 = 4168;
pub const SCH_STYLE_DEEP: u32 = 4169;
pub const SCH_STYLE_3D: u32 = 4170;
pub const SCH_STYLE_VERTICAL: u32 = 4171;
pub const SCH_STYLE_BASETYPE: u32 = 4172;
pub const SCH_STYLE_LINES: u32 = 4173;
pub const SCH_STYLE_PERCENT: u32 = 4174;
pub const SCH_STYLE_STACKED: u32 = 4175;
pub const SCH_STYLE_SPLINES: u32 = 4176;
pub const SCH_STYLE_SYMBOL: u32 = 4177;
pub const SCH_STYLE_SHAPE: u32 = 4178;
pub const SCH_AXIS: u32 = 4179;
pub const SCH_AXIS_TICKS: u32 = 4180;
pub const SCH_AXIS_HELPTICKS: u32 = 4181;
pub const SCH_AXIS_NUMFMT: u32 = 4182;
pub const SCH_AXIS_NUMFMTPERCENT: u32 = 4183;
pub const SCH_AXIS_SHOWAXIS: u32 = 4184;
pub const SCH_AXIS_SHOWDESCR: u32 = 4185;
pub const SCH_AXIS_SHOWMAINGRID: u32 = 4186;
pub const SCH_AXIS_SHOWHELPGRID: u32 = 4187;
pub const SCH_AXIS_TOPDOWN: u32 = 4188;
pub const SCH_AXIS_DUMMY0: u32 = 4189;
pub const SCH_AXIS_DUMMY3: u32 = 4192;
pub const SCH_BAR_OVERLAP: u32 = 4193;
pub const SCH_BAR_GAPWIDTH: u32 = 4194;
pub const SCH_STOCK_VOLUME: u32 = 4195;
pub const SCH_STOCK_UPDOWN: u32 = 4196;
pub const SCH_SYMBOL_SIZE: u32 = 4197;
pub const SCH_USER_DEFINED_ATTR: u32 = 4198;

/// Identifier of field `field` (0..11) in the block of chart axis `axis`
/// (0 = x, 1 = y, 2 = z, 3 = every axis).
pub const fn sch_axis(axis: u32, field: u32) -> u32 {
    SCH_AXIS_BLOCK_START + axis * SCH_AXIS_BLOCK_LEN + field
}

/// Limits of the item set stored by [`SDRATTR_SET_OUTLINER`].
pub const OUTLINER_LIMITS: &[(u32, u32)] = &[(EE_ITEMS_START, EE_ITEMS_END)];

/// Limits of the paragraph item sets of an edit text object.
pub const EDIT_TEXT_LIMITS: &[(u32, u32)] = &[(EE_ITEMS_START, EE_CHAR_END)];

/// Limits of the header and footer item sets of a page.
pub const PAGE_SET_LIMITS: &[(u32, u32)] = &[(FRM_BEGIN, FRM_END), (PAGE_BEGIN, PAGE_END)];
