/// Tag separator.
pub const SOH: u8 = 0x01;

/// Identifies the versions of the FIX protocol currently supported.
/// Unknown begin-strings parse to `Unknown` without failing the message.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum Version {
    V4_2,
    V4_4,
    #[default]
    Unknown,
}

impl Version {
    /// The BeginString value for this version.
    pub const fn name(self) -> &'static str {
        match self {
            Version::V4_2 => "FIX.4.2",
            Version::V4_4 => "FIX.4.4",
            Version::Unknown => "UNKNOWN",
        }
    }

    /// Map a BeginString value to a version.
    pub fn from_name(view: &[u8]) -> Self {
        match view {
            b"FIX.4.2" => Version::V4_2,
            b"FIX.4.4" => Version::V4_4,
            _ => Version::Unknown,
        }
    }
}

/// Identifies the tags for fields in a message.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
#[repr(u32)]
pub enum Tag {
    Account = 1,
    AggressorIndicator = 1057,
    ApplicationSystemName = 1603,
    ApplicationSystemVendor = 1605,
    ApplicationSystemVersion = 1604,
    AvgPx = 6,
    BeginSeqNo = 7,
    BeginString = 8,
    BodyLength = 9,
    BusinessRejectReason = 380,
    CheckSum = 10,
    ClOrdId = 11,
    ContraBroker = 375,
    ContraTrader = 337,
    CorrelationClOrdId = 9717,
    CrossId = 548,
    CrossType = 549,
    CtiCode = 9702,
    CumQty = 14,
    CustomerOrFirm = 204,
    CxlRejReason = 102,
    CxlRejResponseTo = 434,
    DisplayFactor = 9787,
    EncryptMethod = 98,
    EndSeqNo = 16,
    EventDate = 866,
    EventPx = 867,
    EventText = 868,
    EventTime = 1145,
    EventType = 865,
    ExecId = 17,
    ExecInst = 18,
    ExecTransType = 20,
    ExecType = 150,
    ExpirationTimeValue = 1189,
    ExpireDate = 432,
    GapFillFlag = 123,
    HandlInst = 21,
    HeartBtInt = 108,
    LastMsgSeqNumProcessed = 369,
    LastPx = 31,
    LastShares = 32,
    LeavesQty = 151,
    LegCfiCode = 608,
    LegCurrency = 556,
    LegMaturityMonthYear = 610,
    LegOptionDelta = 1017,
    LegPrice = 566,
    LegRatioQty = 623,
    LegSecurityId = 602,
    LegSecurityIdSource = 603,
    LegSecuritySubType = 764,
    LegSide = 624,
    LegStrikeCurrency = 942,
    LegStrikePrice = 612,
    LegSymbol = 600,
    ManualOrderIndicator = 1028,
    MarketDepth = 264,
    MaxShow = 210,
    MdBookType = 1021,
    MdFeedType = 1022,
    MinPriceIncrement = 969,
    MinQty = 110,
    MsgSeqNum = 34,
    MsgType = 35,
    MultiLegReportingType = 442,
    NewSeqNo = 36,
    NextExpectedMsgSeqNum = 789,
    NoEvents = 864,
    NoLegs = 555,
    NoMdFeedTypes = 1141,
    NoRelatedSym = 146,
    NoSecurityAltId = 454,
    NoUnderlyings = 711,
    OfmOverride = 9768,
    OpenClose = 77,
    OptionDelta = 811,
    OrderId = 37,
    OrderQty = 38,
    OrdRejReason = 103,
    OrdStatus = 39,
    OrdType = 40,
    OrigClOrdId = 41,
    OrigSendingTime = 122,
    PossDupFlag = 43,
    PossResend = 97,
    Price = 44,
    RawData = 96,
    RawDataLength = 95,
    RefMsgType = 372,
    RefSeqNum = 45,
    ResetSeqNumFlag = 141,
    RiskFreeRate = 1190,
    SecondaryExecId = 527,
    SecurityDesc = 107,
    SecurityGroup = 1151,
    SecurityId = 48,
    SecurityResponseType = 323,
    SecurityType = 167,
    SenderCompId = 49,
    SenderLocationId = 142,
    SenderSubId = 50,
    SendingTime = 52,
    Side = 54,
    StopPx = 99,
    Symbol = 55,
    TargetLocationId = 143,
    TargetCompId = 56,
    TargetSubId = 57,
    TestReqId = 112,
    Text = 58,
    TimeInForce = 59,
    TotalNumSecurities = 393,
    TradeDate = 75,
    TransactTime = 60,
    UnderlyingSecurityId = 309,
    UnderlyingPx = 810,
    UnderlyingSecurityIdSource = 305,
    UnderlyingSymbol = 311,
    Volatility = 1188,
}

impl Tag {
    /// The wire number for this tag.
    pub const fn num(self) -> u32 {
        self as u32
    }
}

/// Provides the width (in chars) for the fixed-width fields of a message.
pub mod tag_width {
    pub const ACCOUNT: usize = 12;
    pub const APPLICATION_SYSTEM_NAME: usize = 30;
    pub const APPLICATION_SYSTEM_VENDOR: usize = 10;
    pub const APPLICATION_SYSTEM_VERSION: usize = 10;
    pub const BODY_LENGTH: usize = 6;
    pub const CHECKSUM: usize = 3;
    pub const CL_ORD_ID: usize = 20;
    pub const CORRELATION_CL_ORD_ID: usize = 5;
    pub const CTI_CODE: usize = 1;
    pub const CUSTOMER_OR_FIRM: usize = 1;
    pub const EXEC_ID: usize = 40;
    pub const LAST_MSG_SEQ_NUM_PROCESSED: usize = 9;
    pub const MANUAL_ORDER_INDICATOR: usize = 1;
    pub const MSG_SEQ_NUM: usize = 9;
    pub const RAW_DATA: usize = 20;
    pub const SENDER_COMP_ID: usize = 7;
    pub const SENDER_LOCATION_ID: usize = 32;
    pub const SENDER_SUB_ID: usize = 20;
    pub const SENDING_TIME: usize = 21;
    pub const TARGET_COMP_ID: usize = 7;
    pub const TARGET_SUB_ID: usize = 20;
    pub const TEST_REQ_ID: usize = 20;
    pub const TEXT: usize = 150;
}

/// Identifies the fix message types.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[repr(u8)]
pub enum MsgType {
    Logon = b'A',
    Heartbeat = b'0',
    TestRequest = b'1',
    ResendRequest = b'2',
    SessionLevelReject = b'3',
    BusinessLevelReject = b'j',
    SequenceReset = b'4',
    Logout = b'5',
    OrderCancelReject = b'9',
    ExecutionReport = b'8',
    NewOrder = b'D',
    CancelOrder = b'F',
    ReviseOrder = b'G',
}

impl MsgType {
    /// The single-byte wire code for this message type.
    pub const fn code(self) -> u8 {
        self as u8
    }
}
